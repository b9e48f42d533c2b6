//! Session context supplied by the caller for each participant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which side of the marketplace a participant is on.
///
/// Unrecognized roles deserialize as [`Role::Other`] and are never tiered
/// as a driver or a searching user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Driver,
    #[serde(other)]
    Other,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Driver => write!(f, "driver"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Activity flags for one participant.
///
/// Never inferred by the manager; callers replace it wholesale through
/// `update_context`. Missing flags deserialize as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideContext {
    pub role: Role,
    #[serde(default)]
    pub has_active_ride: bool,
    #[serde(default)]
    pub is_searching: bool,
    #[serde(default)]
    pub is_available: bool,
}

impl RideContext {
    /// A context with every activity flag cleared.
    #[must_use]
    pub const fn idle(role: Role) -> Self {
        Self {
            role,
            has_active_ride: false,
            is_searching: false,
            is_available: false,
        }
    }

    /// A user or driver currently on a ride.
    #[must_use]
    pub const fn on_ride(role: Role) -> Self {
        Self {
            has_active_ride: true,
            ..Self::idle(role)
        }
    }

    /// A driver waiting for ride requests.
    #[must_use]
    pub const fn available_driver() -> Self {
        Self {
            is_available: true,
            ..Self::idle(Role::Driver)
        }
    }

    /// A user looking for a driver.
    #[must_use]
    pub const fn searching_user() -> Self {
        Self {
            is_searching: true,
            ..Self::idle(Role::User)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;

    #[test]
    fn missing_flags_default_to_false() {
        let ctx: RideContext = serde_json::from_str(r#"{"role":"driver","isAvailable":true}"#)
            .expect("valid context");
        assert_eq!(ctx, RideContext::available_driver());
    }

    #[test]
    fn unknown_role_falls_back_to_other() {
        let ctx: RideContext = serde_json::from_str(r#"{"role":"admin","isAvailable":true}"#)
            .expect("unknown role still parses");
        assert_eq!(ctx.role, Role::Other);
        assert_eq!(Tier::score(&ctx), Tier::Idle);
    }

    #[test]
    fn unknown_role_on_ride_is_active() {
        let ctx: RideContext = serde_json::from_str(r#"{"role":"admin","hasActiveRide":true}"#)
            .expect("unknown role still parses");
        assert_eq!(Tier::score(&ctx), Tier::ActiveRide);
    }
}
