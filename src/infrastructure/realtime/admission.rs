use std::time::Instant;

use tracing::{debug, info, warn};

use super::event::{ModeChange, RebalanceOutcome};
use super::registry::Registry;
use crate::domain::{ParticipantId, RideContext, Tier};

impl Registry {
    /// Decide the mode of a participant that holds no slot.
    ///
    /// Takes a free slot if there is one, otherwise evicts the weakest
    /// occupant when it is strictly outranked and past its hold time,
    /// otherwise parks the participant in polling at its tier's cadence.
    pub(super) fn admit(&mut self, id: &ParticipantId, now: Instant, changes: &mut Vec<ModeChange>) {
        let Some(tier) = self.tier_of(id.as_str()) else {
            return;
        };
        if self.pool.contains(id.as_str()) {
            return;
        }

        if self.promote(id, now, changes) {
            info!(participant = %id, tier = %tier, "Admitted to free realtime slot");
            return;
        }

        // Only the weakest occupant is ever compared. If it is still inside
        // its hold time the newcomer waits, even when a stronger occupant
        // could be evicted.
        if let Some((victim, victim_tier, eligible)) = self.weakest_occupant(now) {
            if eligible && tier.outranks(victim_tier) {
                info!(
                    participant = %id,
                    tier = %tier,
                    evicted = %victim,
                    evicted_tier = %victim_tier,
                    "Evicting lower-priority occupant"
                );
                self.demote(&victim, changes);
                self.promote(id, now, changes);
                return;
            }
        }

        self.park(id, changes);
        if tier == Tier::ActiveRide {
            warn!(
                participant = %id,
                active = self.pool.len(),
                max = self.pool.capacity(),
                "No evictable slot, active ride left under-served"
            );
        } else {
            debug!(
                participant = %id,
                tier = %tier,
                interval_ms = self.polling.interval(id.as_str()).map(|d| d.as_millis() as u64),
                "Admitted to polling"
            );
        }
    }

    /// Replace a participant's context, re-admitting it if its tier changed.
    ///
    /// Returns `false` for an unknown participant.
    pub(super) fn apply_context(
        &mut self,
        id: &str,
        context: RideContext,
        now: Instant,
        changes: &mut Vec<ModeChange>,
    ) -> bool {
        let Some(participant) = self.participants.get_mut(id) else {
            debug!(participant = id, "Context update for unknown participant ignored");
            return false;
        };
        participant.context = context;
        let tier = Tier::score(&context);
        if tier == participant.tier {
            debug!(participant = id, tier = %tier, "Context updated, tier unchanged");
            return true;
        }

        let previous = std::mem::replace(&mut participant.tier, tier);
        let id = participant.id.clone();
        info!(participant = %id, from = %previous, to = %tier, "Tier changed");

        // An occupant keeps its slot here; the rebalance pass below decides
        // whether a better candidate now outranks it.
        if !self.pool.contains(id.as_str()) {
            self.admit(&id, now, changes);
        }
        let outcome = self.rebalance(now, changes);
        log_outcome(&outcome, "context change");
        true
    }

    /// Stop tracking a participant, handing its slot on immediately.
    ///
    /// Returns `false` for an unknown participant.
    pub(super) fn remove(&mut self, id: &str, now: Instant, changes: &mut Vec<ModeChange>) -> bool {
        let Some(participant) = self.participants.remove(id) else {
            debug!(participant = id, "Disconnect for unknown participant ignored");
            return false;
        };
        let held_slot = self.pool.release(id);
        self.polling.remove(id);
        info!(
            participant = id,
            tier = %participant.tier,
            held_slot,
            session_secs = now.duration_since(participant.enqueued_at).as_secs(),
            "Participant disconnected"
        );
        changes.push(ModeChange::Removed { id: participant.id });

        if held_slot {
            let outcome = self.rebalance(now, changes);
            log_outcome(&outcome, "disconnect");
        }
        true
    }
}

pub(super) fn log_outcome(outcome: &RebalanceOutcome, trigger: &'static str) {
    if outcome.is_empty() {
        debug!(trigger, "Rebalance made no changes");
    } else {
        info!(
            trigger,
            promoted = outcome.promoted.len(),
            demoted = outcome.demoted.len(),
            "Rebalanced realtime slots"
        );
    }
}
