//! Fixed-capacity registry of realtime slots.

use crate::domain::ParticipantId;

/// Tracks which participant occupies each realtime slot.
///
/// The pool never evicts on its own; choosing a victim is the admission
/// controller's job.
#[derive(Debug)]
pub(super) struct SlotPool {
    capacity: usize,
    occupants: Vec<ParticipantId>,
}

impl SlotPool {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            occupants: Vec::with_capacity(capacity),
        }
    }

    /// Claim a slot for `id`.
    ///
    /// Returns `false` when every slot is taken. A participant that already
    /// holds a slot keeps its single slot and gets `true`.
    pub(super) fn try_acquire(&mut self, id: &ParticipantId) -> bool {
        if self.contains(id.as_str()) {
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.occupants.push(id.clone());
        true
    }

    /// Free the slot held by `id`, returning whether it held one.
    pub(super) fn release(&mut self, id: &str) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|occupant| occupant.as_str() != id);
        self.occupants.len() != before
    }

    pub(super) fn occupants(&self) -> impl Iterator<Item = &ParticipantId> {
        self.occupants.iter()
    }

    pub(super) fn contains(&self, id: &str) -> bool {
        self.occupants.iter().any(|occupant| occupant.as_str() == id)
    }

    pub(super) fn is_full(&self) -> bool {
        self.occupants.len() >= self.capacity
    }

    pub(super) fn len(&self) -> usize {
        self.occupants.len()
    }

    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }
}
