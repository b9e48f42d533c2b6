//! Command-line interface definitions.

pub mod check;
pub mod command;
pub mod output;
pub mod run;
pub mod simulate;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hybrid realtime connection manager for ride-hailing sessions.
#[derive(Parser, Debug)]
#[command(name = "hybrid-realtime")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the JSON-lines command protocol on stdin/stdout
    Run(RunArgs),

    /// Replay the reference connection scenario
    Simulate(SimulateArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `hybrid-realtime check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of realtime slots
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the number of realtime slots
    #[arg(long)]
    pub max_connections: Option<usize>,

    /// Simulated pause between steps, in milliseconds
    #[arg(long, default_value = "1000")]
    pub pause_ms: u64,
}
