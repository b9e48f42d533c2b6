use clap::Parser;
use hybrid_realtime::cli::{check, output, run, simulate, CheckCommand, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args).await,
        Commands::Simulate(args) => simulate::execute(args),
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
    };

    // Exit explicitly: a pending stdin read would otherwise hold the runtime open.
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
    }
}
