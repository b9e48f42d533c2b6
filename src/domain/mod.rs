//! Participant-level domain types.
//!
//! Everything here is plain data with no locking; the realtime manager in
//! [`crate::infrastructure::realtime`] owns the mutable state.

mod context;
mod id;
pub(crate) mod millis;
mod participant;
mod stats;
mod tier;

pub use context::{RideContext, Role};
pub use id::ParticipantId;
pub use participant::{Mode, ParticipantSnapshot};
pub use stats::ConnectionStats;
pub use tier::{PollingCadence, Tier};
