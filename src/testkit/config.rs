//! Canonical test configurations.
//!
//! Single source of truth for manager configs used across tests.

use crate::infrastructure::config::manager::ManagerConfig;

/// Default hold time used by tests (matches the production default).
pub const HOLD_MS: u64 = 5_000;

/// Manager config with `max_connections` slots and the default cadences.
pub fn slots(max_connections: usize) -> ManagerConfig {
    ManagerConfig {
        max_connections,
        ..ManagerConfig::default()
    }
}

/// Manager config with a custom minimum hold time.
pub fn slots_with_hold(max_connections: usize, min_hold_time_ms: u64) -> ManagerConfig {
    ManagerConfig {
        max_connections,
        min_hold_time_ms,
        ..ManagerConfig::default()
    }
}
