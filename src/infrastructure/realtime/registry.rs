//! Participant registry and the slot/polling state it owns.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::event::ModeChange;
use super::polling::PollingScheduler;
use super::pool::SlotPool;
use crate::domain::{
    ConnectionStats, Mode, ParticipantId, ParticipantSnapshot, RideContext, Tier,
};
use crate::infrastructure::config::manager::ManagerConfig;

/// One tracked session.
#[derive(Debug)]
pub(super) struct Participant {
    pub(super) id: ParticipantId,
    pub(super) context: RideContext,
    pub(super) tier: Tier,
    /// Admission order, the FIFO tie-break within a tier.
    pub(super) seq: u64,
    pub(super) enqueued_at: Instant,
    pub(super) slot_held_since: Option<Instant>,
}

/// All mutable manager state. Only ever touched under the manager's lock.
///
/// A participant is realtime exactly when it occupies a pool slot, and
/// polling exactly when the scheduler holds an interval for it.
#[derive(Debug)]
pub(super) struct Registry {
    pub(super) participants: HashMap<ParticipantId, Participant>,
    pub(super) pool: SlotPool,
    pub(super) polling: PollingScheduler,
    pub(super) min_hold: Duration,
    next_seq: u64,
}

impl Registry {
    pub(super) fn new(config: &ManagerConfig) -> Self {
        Self {
            participants: HashMap::new(),
            pool: SlotPool::new(config.max_connections),
            polling: PollingScheduler::new(config.cadence()),
            min_hold: config.min_hold_time(),
            next_seq: 0,
        }
    }

    /// Track a new participant. It holds no slot and no interval yet.
    pub(super) fn insert(&mut self, id: ParticipantId, context: RideContext, now: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let tier = Tier::score(&context);
        debug!(participant = %id, tier = %tier, "Tracking participant");
        self.participants.insert(
            id.clone(),
            Participant {
                id,
                context,
                tier,
                seq,
                enqueued_at: now,
                slot_held_since: None,
            },
        );
    }

    pub(super) fn contains(&self, id: &str) -> bool {
        self.participants.contains_key(id)
    }

    pub(super) fn tier_of(&self, id: &str) -> Option<Tier> {
        self.participants.get(id).map(|p| p.tier)
    }

    /// Move `id` into a free slot. Returns `false` if the pool is full.
    pub(super) fn promote(
        &mut self,
        id: &ParticipantId,
        now: Instant,
        changes: &mut Vec<ModeChange>,
    ) -> bool {
        let Some(participant) = self.participants.get_mut(id.as_str()) else {
            return false;
        };
        if !self.pool.try_acquire(id) {
            return false;
        }
        self.polling.remove(id.as_str());
        participant.slot_held_since = Some(now);
        changes.push(ModeChange::Realtime {
            id: id.clone(),
            tier: participant.tier,
        });
        true
    }

    /// Release the slot held by `id` and serve it by polling instead.
    pub(super) fn demote(&mut self, id: &ParticipantId, changes: &mut Vec<ModeChange>) {
        self.pool.release(id.as_str());
        if let Some(participant) = self.participants.get_mut(id.as_str()) {
            participant.slot_held_since = None;
        }
        self.park(id, changes);
    }

    /// (Re)assign the polling cadence matching the participant's tier.
    pub(super) fn park(&mut self, id: &ParticipantId, changes: &mut Vec<ModeChange>) {
        let Some(tier) = self.tier_of(id.as_str()) else {
            return;
        };
        let interval = self.polling.assign(id, tier);
        changes.push(ModeChange::Polling {
            id: id.clone(),
            tier,
            interval,
            under_served: tier == Tier::ActiveRide,
        });
    }

    /// Highest-priority participant served by polling.
    ///
    /// Lowest tier wins, then earliest admission.
    pub(super) fn best_polling_candidate(&self) -> Option<(ParticipantId, Tier)> {
        self.participants
            .values()
            .filter(|p| !self.pool.contains(p.id.as_str()))
            .min_by_key(|p| (p.tier, p.seq))
            .map(|p| (p.id.clone(), p.tier))
    }

    /// Lowest-priority occupant, regardless of how long it has held its slot.
    ///
    /// Highest tier loses, then the most recent admission. The flag tells
    /// whether it is past the minimum hold time.
    pub(super) fn weakest_occupant(&self, now: Instant) -> Option<(ParticipantId, Tier, bool)> {
        self.pool
            .occupants()
            .filter_map(|id| self.participants.get(id.as_str()))
            .max_by_key(|p| (p.tier, p.seq))
            .map(|p| (p.id.clone(), p.tier, self.hold_elapsed(p, now)))
    }

    fn hold_elapsed(&self, participant: &Participant, now: Instant) -> bool {
        participant
            .slot_held_since
            .is_some_and(|since| now.duration_since(since) >= self.min_hold)
    }

    /// Lowest-priority occupant that has held its slot for the minimum hold time.
    ///
    /// Highest tier loses, then the most recent admission.
    pub(super) fn eviction_candidate(&self, now: Instant) -> Option<(ParticipantId, Tier)> {
        self.pool
            .occupants()
            .filter_map(|id| self.participants.get(id.as_str()))
            .filter(|p| self.hold_elapsed(p, now))
            .max_by_key(|p| (p.tier, p.seq))
            .map(|p| (p.id.clone(), p.tier))
    }

    pub(super) fn snapshot(&self, id: &str, now: Instant) -> Option<ParticipantSnapshot> {
        self.participants.get(id).map(|p| self.describe(p, now))
    }

    /// Every participant, highest priority first.
    pub(super) fn snapshots(&self, now: Instant) -> Vec<ParticipantSnapshot> {
        let mut participants: Vec<&Participant> = self.participants.values().collect();
        participants.sort_by_key(|p| (p.tier, p.seq));
        participants.into_iter().map(|p| self.describe(p, now)).collect()
    }

    fn describe(&self, participant: &Participant, now: Instant) -> ParticipantSnapshot {
        let realtime = self.pool.contains(participant.id.as_str());
        ParticipantSnapshot {
            id: participant.id.clone(),
            role: participant.context.role,
            tier: participant.tier,
            mode: if realtime { Mode::Realtime } else { Mode::Polling },
            poll_interval: if realtime {
                None
            } else {
                self.polling.interval(participant.id.as_str())
            },
            under_served: !realtime && participant.tier == Tier::ActiveRide,
            holds_slot_for: participant
                .slot_held_since
                .filter(|_| realtime)
                .map(|since| now.duration_since(since)),
        }
    }

    pub(super) fn stats(&self) -> ConnectionStats {
        debug_assert_eq!(
            self.pool.len() + self.polling.len(),
            self.participants.len(),
            "every participant is either realtime or polling"
        );
        let under_served = self
            .participants
            .values()
            .filter(|p| p.tier == Tier::ActiveRide && !self.pool.contains(p.id.as_str()))
            .count();
        ConnectionStats::new(
            self.pool.len(),
            self.pool.capacity(),
            self.participants.len(),
            under_served,
        )
    }
}
