//! Interval bookkeeping for participants without a realtime slot.
//!
//! Only assigns cadences; the polling I/O itself belongs to whoever
//! consumes the published [`ModeChange`](super::ModeChange) events.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::{ParticipantId, PollingCadence, Tier};

#[derive(Debug)]
pub(super) struct PollingScheduler {
    cadence: PollingCadence,
    intervals: HashMap<ParticipantId, Duration>,
}

impl PollingScheduler {
    pub(super) fn new(cadence: PollingCadence) -> Self {
        Self {
            cadence,
            intervals: HashMap::new(),
        }
    }

    /// Assign the cadence for `tier`, replacing any previous one.
    ///
    /// An active ride has no cadence of its own; when it ends up here it is
    /// under-served and falls back to the frequent interval.
    pub(super) fn assign(&mut self, id: &ParticipantId, tier: Tier) -> Duration {
        let interval = tier.poll_interval(&self.cadence).unwrap_or(self.cadence.frequent);
        self.intervals.insert(id.clone(), interval);
        interval
    }

    pub(super) fn remove(&mut self, id: &str) -> Option<Duration> {
        self.intervals.remove(id)
    }

    pub(super) fn interval(&self, id: &str) -> Option<Duration> {
        self.intervals.get(id).copied()
    }

    pub(super) fn len(&self) -> usize {
        self.intervals.len()
    }
}
