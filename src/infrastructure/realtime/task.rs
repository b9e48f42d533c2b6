//! Timer-driven rebalancing.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::RealtimeManager;

/// Spawn a task that runs a rebalance pass every
/// [`rebalance_interval`](crate::infrastructure::config::manager::ManagerConfig::rebalance_interval)
/// until `shutdown` becomes `true` or its sender is dropped.
///
/// The pass runs inside the manager's lock like every other operation.
pub fn spawn_rebalancer(
    manager: Arc<RealtimeManager>,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = manager.config().rebalance_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        info!(interval_ms = period.as_millis() as u64, "Rebalancer started");
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let outcome = manager.rebalance_connections();
                    if !outcome.is_empty() {
                        debug!(promoted = ?outcome.promoted, demoted = ?outcome.demoted, "Periodic rebalance");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        info!("Rebalancer stopped");
    })
}
