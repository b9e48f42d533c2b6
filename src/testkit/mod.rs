//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Context builders and the reference harness roster.
//! - [`config`] - Canonical manager configurations.

pub mod config;
pub mod domain;

use std::sync::Arc;

use crate::infrastructure::config::manager::ManagerConfig;
use crate::infrastructure::realtime::{ManualClock, RealtimeManager};

/// Build a manager driven by a fresh [`ManualClock`].
pub fn manual_manager(config: ManagerConfig) -> (RealtimeManager, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let manager = RealtimeManager::with_clock(config, clock.clone());
    (manager, clock)
}
