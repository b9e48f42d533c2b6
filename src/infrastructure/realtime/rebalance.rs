use std::time::Instant;

use tracing::info;

use super::event::{ModeChange, RebalanceOutcome};
use super::registry::Registry;

impl Registry {
    /// Re-evaluate every participant against current slot occupancy.
    ///
    /// Free slots are filled with the best polling candidates first. Then
    /// the weakest hold-eligible occupant is swapped for the best polling
    /// candidate while the candidate strictly outranks it. A freshly
    /// promoted participant is not hold-eligible, so each pass is bounded
    /// and nobody oscillates within the minimum hold time.
    pub(super) fn rebalance(
        &mut self,
        now: Instant,
        changes: &mut Vec<ModeChange>,
    ) -> RebalanceOutcome {
        let mut outcome = RebalanceOutcome::default();

        while !self.pool.is_full() {
            let Some((candidate, tier)) = self.best_polling_candidate() else {
                break;
            };
            if !self.promote(&candidate, now, changes) {
                break;
            }
            info!(participant = %candidate, tier = %tier, "Promoted into free slot");
            outcome.promoted.push(candidate);
        }

        loop {
            let Some((candidate, candidate_tier)) = self.best_polling_candidate() else {
                break;
            };
            let Some((victim, victim_tier)) = self.eviction_candidate(now) else {
                break;
            };
            if !candidate_tier.outranks(victim_tier) {
                break;
            }

            info!(
                promoted = %candidate,
                promoted_tier = %candidate_tier,
                demoted = %victim,
                demoted_tier = %victim_tier,
                "Swapping realtime slot"
            );
            self.demote(&victim, changes);
            if !self.promote(&candidate, now, changes) {
                break;
            }
            outcome.demoted.push(victim);
            outcome.promoted.push(candidate);
        }

        outcome
    }
}
