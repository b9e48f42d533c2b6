//! Pool occupancy statistics.

use std::fmt;

use serde::Serialize;

/// Occupancy of the realtime slot pool at one instant.
///
/// `polling_users` is always `total_users - active_connections`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStats {
    pub active_connections: usize,
    pub max_connections: usize,
    pub polling_users: usize,
    pub total_users: usize,
    /// Active rides currently served by polling.
    pub under_served: usize,
}

impl ConnectionStats {
    /// Build stats from raw counts.
    #[must_use]
    pub fn new(
        active_connections: usize,
        max_connections: usize,
        total_users: usize,
        under_served: usize,
    ) -> Self {
        Self {
            active_connections,
            max_connections,
            polling_users: total_users.saturating_sub(active_connections),
            total_users,
            under_served,
        }
    }

    /// Slots not currently held by anyone.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.max_connections.saturating_sub(self.active_connections)
    }
}

impl fmt::Display for ConnectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} realtime, {} polling, {} total",
            self.active_connections, self.max_connections, self.polling_users, self.total_users
        )
    }
}
