//! Realtime manager configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::PollingCadence;

/// Slot quota, polling cadences and anti-churn settings.
///
/// `max_connections` mirrors the backend plan's concurrent subscription
/// quota and should not exceed it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManagerConfig {
    /// Number of realtime slots.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// Polling interval for available drivers and searching users (milliseconds).
    #[serde(default = "default_frequent_poll_ms")]
    pub frequent_poll_ms: u64,
    /// Polling interval for idle participants (milliseconds).
    #[serde(default = "default_occasional_poll_ms")]
    pub occasional_poll_ms: u64,
    /// Minimum time a slot is held before it may be taken away (milliseconds).
    #[serde(default = "default_min_hold_time_ms")]
    pub min_hold_time_ms: u64,
    /// Period of the background rebalance pass (milliseconds).
    #[serde(default = "default_rebalance_interval_ms")]
    pub rebalance_interval_ms: u64,
    /// Buffer size of the mode-change broadcast channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

const fn default_max_connections() -> usize {
    2
}

const fn default_frequent_poll_ms() -> u64 {
    15_000
}

const fn default_occasional_poll_ms() -> u64 {
    30_000
}

const fn default_min_hold_time_ms() -> u64 {
    5_000
}

const fn default_rebalance_interval_ms() -> u64 {
    15_000
}

const fn default_event_capacity() -> usize {
    256
}

impl ManagerConfig {
    #[must_use]
    pub fn cadence(&self) -> PollingCadence {
        PollingCadence {
            frequent: Duration::from_millis(self.frequent_poll_ms),
            occasional: Duration::from_millis(self.occasional_poll_ms),
        }
    }

    #[must_use]
    pub fn min_hold_time(&self) -> Duration {
        Duration::from_millis(self.min_hold_time_ms)
    }

    #[must_use]
    pub fn rebalance_interval(&self) -> Duration {
        Duration::from_millis(self.rebalance_interval_ms)
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_connections: default_max_connections(),
            frequent_poll_ms: default_frequent_poll_ms(),
            occasional_poll_ms: default_occasional_poll_ms(),
            min_hold_time_ms: default_min_hold_time_ms(),
            rebalance_interval_ms: default_rebalance_interval_ms(),
            event_capacity: default_event_capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_free_plan() {
        let config = ManagerConfig::default();
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.cadence(), PollingCadence::default());
        assert_eq!(config.min_hold_time(), Duration::from_secs(5));
    }

    #[test]
    fn partial_table_fills_defaults() {
        let config: ManagerConfig = toml::from_str("max_connections = 4").unwrap();
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.frequent_poll_ms, 15_000);
        assert_eq!(config.rebalance_interval(), Duration::from_secs(15));
    }
}
