//! Priority scoring for participants.
//!
//! [`Tier`] is the single, total ordering every admission and rebalance
//! decision is made against. Smaller tiers are served first.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::context::{RideContext, Role};

/// Polling cadences a demoted participant can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingCadence {
    /// Interval for participants that need timely updates (tiers 1 and 2).
    pub frequent: Duration,
    /// Interval for idle participants (tier 3).
    pub occasional: Duration,
}

impl Default for PollingCadence {
    fn default() -> Self {
        Self {
            frequent: Duration::from_millis(15_000),
            occasional: Duration::from_millis(30_000),
        }
    }
}

/// Priority class derived from a participant's role and activity flags.
///
/// Variants are declared highest priority first, so the derived `Ord`
/// sorts the most important participants to the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// On a ride, either role. Must receive live updates.
    ActiveRide,
    /// Driver waiting for incoming ride requests.
    AvailableDriver,
    /// User looking for a driver.
    SearchingUser,
    /// Everything else.
    Idle,
}

impl Tier {
    /// Score a context.
    ///
    /// The active-ride check runs first, so conflicting flags (a user both
    /// on a ride and searching, a driver both on a ride and available)
    /// always resolve to [`Tier::ActiveRide`].
    #[must_use]
    pub const fn score(context: &RideContext) -> Self {
        if context.has_active_ride {
            return Self::ActiveRide;
        }
        match context.role {
            Role::Driver if context.is_available => Self::AvailableDriver,
            Role::User if context.is_searching => Self::SearchingUser,
            _ => Self::Idle,
        }
    }

    /// Numeric tier, 0 being the highest priority.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Polling interval for a participant of this tier.
    ///
    /// Active rides are never given a cadence of their own.
    #[must_use]
    pub const fn poll_interval(self, cadence: &PollingCadence) -> Option<Duration> {
        match self {
            Self::ActiveRide => None,
            Self::AvailableDriver | Self::SearchingUser => Some(cadence.frequent),
            Self::Idle => Some(cadence.occasional),
        }
    }

    /// Stable name used in logs and JSON output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ActiveRide => "active_ride",
            Self::AvailableDriver => "available_driver",
            Self::SearchingUser => "searching_user",
            Self::Idle => "idle",
        }
    }

    /// True if `self` should be served before `other`.
    #[must_use]
    pub fn outranks(self, other: Self) -> bool {
        self < other
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
