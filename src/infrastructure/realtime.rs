//! Hybrid realtime connection manager.
//!
//! This module provides [`RealtimeManager`], which multiplexes a hard-capped
//! pool of live subscription slots across every tracked user and driver
//! session. Participants that do not fit are served by interval polling,
//! and slots are continuously rebalanced towards the highest-priority
//! [`Tier`](crate::domain::Tier).

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::domain::{ConnectionStats, ParticipantId, ParticipantSnapshot, RideContext};
use crate::infrastructure::config::manager::ManagerConfig;

mod admission;
mod clock;
mod event;
mod polling;
mod pool;
mod rebalance;
mod registry;
mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{ModeChange, RebalanceOutcome};
pub use task::spawn_rebalancer;

use admission::log_outcome;
use registry::Registry;

/// Admission controller for the realtime slot pool.
///
/// # Thread Safety
///
/// All state lives behind a single [`Mutex`]. Every operation, including the
/// rebalance pass and the stats read, runs as one critical section, so
/// `active_connections <= max_connections` holds for every observer.
///
/// # Example
///
/// ```
/// use hybrid_realtime::domain::{RideContext, Role};
/// use hybrid_realtime::infrastructure::config::manager::ManagerConfig;
/// use hybrid_realtime::infrastructure::realtime::RealtimeManager;
///
/// let manager = RealtimeManager::new(ManagerConfig::default());
/// manager.connect_user("user-active-1", RideContext::on_ride(Role::User));
/// manager.connect_user("driver-available-1", RideContext::available_driver());
///
/// let stats = manager.get_stats();
/// assert_eq!(stats.active_connections, 2);
/// assert!(manager.is_realtime("user-active-1"));
/// ```
pub struct RealtimeManager {
    state: Mutex<Registry>,
    config: ManagerConfig,
    clock: Arc<dyn Clock>,
    /// Broadcast sender for mode changes.
    /// Wrapped in Option to allow construction without notifications.
    tx: Option<broadcast::Sender<ModeChange>>,
}

impl RealtimeManager {
    /// Create a manager driven by the system clock, without notifications.
    #[must_use]
    pub fn new(config: ManagerConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a manager driven by a custom clock.
    #[must_use]
    pub fn with_clock(config: ManagerConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(Registry::new(&config)),
            config,
            clock,
            tx: None,
        }
    }

    /// Enable mode-change notifications.
    ///
    /// Returns the manager and a receiver; more receivers can be created via
    /// [`subscribe`](Self::subscribe).
    #[must_use]
    pub fn with_notifications(mut self) -> (Self, broadcast::Receiver<ModeChange>) {
        let (tx, rx) = broadcast::channel(self.config.event_capacity.max(1));
        self.tx = Some(tx);
        (self, rx)
    }

    /// Subscribe to mode changes.
    ///
    /// Returns `None` if the manager was created without notifications.
    #[must_use]
    pub fn subscribe(&self) -> Option<broadcast::Receiver<ModeChange>> {
        self.tx.as_ref().map(broadcast::Sender::subscribe)
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Start tracking a session, or replace its context if already tracked.
    pub fn connect_user(&self, id: impl Into<ParticipantId>, context: RideContext) {
        let id = id.into();
        let now = self.clock.now();
        let mut state = self.state.lock();
        let mut changes = Vec::new();

        if state.contains(id.as_str()) {
            state.apply_context(id.as_str(), context, now, &mut changes);
        } else {
            state.insert(id.clone(), context, now);
            state.admit(&id, now, &mut changes);
        }
        self.publish(changes);
    }

    /// Stop tracking a session. Unknown ids are ignored.
    ///
    /// A freed slot is handed on before this returns. Returns whether the
    /// participant was tracked.
    pub fn disconnect_user(&self, id: &str) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let mut changes = Vec::new();
        let removed = state.remove(id, now, &mut changes);
        self.publish(changes);
        removed
    }

    /// Replace a tracked session's context. Unknown ids are ignored.
    ///
    /// Returns whether the participant was tracked.
    pub fn update_context(&self, id: &str, context: RideContext) -> bool {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let mut changes = Vec::new();
        let updated = state.apply_context(id, context, now, &mut changes);
        self.publish(changes);
        updated
    }

    /// Run one rebalance pass. Safe to call at any time and from a timer.
    pub fn rebalance_connections(&self) -> RebalanceOutcome {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let mut changes = Vec::new();
        let outcome = state.rebalance(now, &mut changes);
        log_outcome(&outcome, "rebalance");
        self.publish(changes);
        outcome
    }

    /// Point-in-time pool occupancy.
    #[must_use]
    pub fn get_stats(&self) -> ConnectionStats {
        self.state.lock().stats()
    }

    /// Point-in-time view of one participant.
    #[must_use]
    pub fn participant(&self, id: &str) -> Option<ParticipantSnapshot> {
        let now = self.clock.now();
        self.state.lock().snapshot(id, now)
    }

    /// Every tracked participant, highest priority first.
    #[must_use]
    pub fn participants(&self) -> Vec<ParticipantSnapshot> {
        let now = self.clock.now();
        self.state.lock().snapshots(now)
    }

    /// True if `id` currently holds a realtime slot.
    #[must_use]
    pub fn is_realtime(&self, id: &str) -> bool {
        self.state.lock().pool.contains(id)
    }

    // Called with the lock held so receivers see changes in commit order.
    fn publish(&self, changes: Vec<ModeChange>) {
        let Some(ref tx) = self.tx else {
            return;
        };
        for change in changes {
            // No receivers is fine.
            let _ = tx.send(change);
        }
    }
}
