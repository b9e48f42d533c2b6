//! Notifications published to the collaborators that perform the I/O.

use std::time::Duration;

use serde::Serialize;

use crate::domain::{millis, ParticipantId, Tier};

/// A change in how a participant must be served.
///
/// The realtime transport subscribes on `Realtime`, the poller schedules on
/// `Polling`, and both tear down on `Removed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ModeChange {
    Realtime {
        id: ParticipantId,
        tier: Tier,
    },
    Polling {
        id: ParticipantId,
        tier: Tier,
        #[serde(rename = "interval_ms", serialize_with = "millis::serialize")]
        interval: Duration,
        under_served: bool,
    },
    Removed {
        id: ParticipantId,
    },
}

impl ModeChange {
    #[must_use]
    pub fn id(&self) -> &ParticipantId {
        match self {
            Self::Realtime { id, .. } | Self::Polling { id, .. } | Self::Removed { id } => id,
        }
    }
}

/// Participants moved by one rebalance pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RebalanceOutcome {
    pub promoted: Vec<ParticipantId>,
    pub demoted: Vec<ParticipantId>,
}

impl RebalanceOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promoted.is_empty() && self.demoted.is_empty()
    }
}
