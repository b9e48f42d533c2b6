//! Handler for the `run` command.
//!
//! Hosts a manager behind the JSON-lines protocol in [`command`](super::command):
//! commands arrive on stdin, replies and mode-change events leave on stdout,
//! logs go to stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{info, warn};

use crate::cli::{command, RunArgs};
use crate::error::Result;
use crate::infrastructure::config::logging::LogFormat;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::realtime::{spawn_rebalancer, ModeChange, RealtimeManager};

const OUTPUT_CAPACITY: usize = 1024;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Apply CLI overrides
    if let Some(max_connections) = args.max_connections {
        config.manager.max_connections = max_connections;
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = LogFormat::Json;
    }
    config.validate()?;

    config.init_logging();
    info!(
        max_connections = config.manager.max_connections,
        min_hold_time_ms = config.manager.min_hold_time_ms,
        rebalance_interval_ms = config.manager.rebalance_interval_ms,
        "hybrid-realtime starting"
    );

    let (manager, events) = RealtimeManager::new(config.manager.clone()).with_notifications();
    let manager = Arc::new(manager);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let rebalancer = spawn_rebalancer(Arc::clone(&manager), shutdown_rx);

    let (out_tx, out_rx) = mpsc::channel(OUTPUT_CAPACITY);
    let writer = tokio::spawn(write_lines(out_rx));

    tokio::select! {
        result = serve(&manager, events, out_tx) => {
            result?;
            info!("Input closed");
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    let _ = shutdown_tx.send(true);
    rebalancer.await?;
    writer.await??;

    info!(stats = %manager.get_stats(), "hybrid-realtime stopped");
    Ok(())
}

/// Interleave command replies and mode changes on one ordered output.
///
/// Events a command publishes are written before that command's reply.
/// Events from the periodic rebalancer are written as they arrive.
async fn serve(
    manager: &RealtimeManager,
    mut events: broadcast::Receiver<ModeChange>,
    out: mpsc::Sender<String>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let reply = command::execute_line(manager, line);
                if !drain_events(&mut events, &out).await || out.send(reply).await.is_err() {
                    return Ok(());
                }
            }
            received = events.recv() => match received {
                Ok(change) => {
                    if !send_change(&out, &change).await {
                        return Ok(());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Event output lagging, mode changes dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
    drain_events(&mut events, &out).await;
    Ok(())
}

/// Write every event already published. Returns `false` once output is gone.
async fn drain_events(events: &mut broadcast::Receiver<ModeChange>, out: &mpsc::Sender<String>) -> bool {
    loop {
        match events.try_recv() {
            Ok(change) => {
                if !send_change(out, &change).await {
                    return false;
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "Event output lagging, mode changes dropped");
            }
            Err(_) => return true,
        }
    }
}

async fn send_change(out: &mpsc::Sender<String>, change: &ModeChange) -> bool {
    match serde_json::to_string(change) {
        Ok(line) => out.send(line).await.is_ok(),
        Err(err) => {
            warn!(error = %err, "Failed to serialize mode change");
            true
        }
    }
}

async fn write_lines(mut lines: mpsc::Receiver<String>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.recv().await {
        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    Ok(())
}
