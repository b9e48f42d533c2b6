//! Participant mode and read-only snapshots.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::context::Role;
use super::id::ParticipantId;
use super::millis;
use super::tier::Tier;

/// How a participant is currently served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Holds one of the live subscription slots.
    Realtime,
    /// Served by interval polling performed by an external collaborator.
    Polling,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realtime => write!(f, "realtime"),
            Self::Polling => write!(f, "polling"),
        }
    }
}

/// Point-in-time view of one tracked participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSnapshot {
    pub id: ParticipantId,
    pub role: Role,
    pub tier: Tier,
    pub mode: Mode,
    /// Set only while polling.
    #[serde(rename = "poll_interval_ms", serialize_with = "millis::serialize_option")]
    pub poll_interval: Option<Duration>,
    /// An active ride that could not be given a slot.
    pub under_served: bool,
    /// How long the current slot has been held, while realtime.
    #[serde(rename = "holds_slot_for_ms", serialize_with = "millis::serialize_option")]
    pub holds_slot_for: Option<Duration>,
}

impl ParticipantSnapshot {
    #[must_use]
    pub fn is_realtime(&self) -> bool {
        self.mode == Mode::Realtime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serializes_intervals_as_millis() {
        let snapshot = ParticipantSnapshot {
            id: ParticipantId::new("user-searching-1"),
            role: Role::User,
            tier: Tier::SearchingUser,
            mode: Mode::Polling,
            poll_interval: Some(Duration::from_secs(15)),
            under_served: false,
            holds_slot_for: None,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["mode"], "polling");
        assert_eq!(json["tier"], "searching_user");
        assert_eq!(json["poll_interval_ms"], 15_000);
        assert!(json["holds_slot_for_ms"].is_null());
    }
}
