//! Builders for participant contexts used across tests.

use crate::domain::{RideContext, Role};

pub fn active_user() -> RideContext {
    RideContext::on_ride(Role::User)
}

pub fn active_driver() -> RideContext {
    RideContext::on_ride(Role::Driver)
}

pub fn available_driver() -> RideContext {
    RideContext::available_driver()
}

pub fn searching_user() -> RideContext {
    RideContext::searching_user()
}

pub fn idle_user() -> RideContext {
    RideContext::idle(Role::User)
}

/// The five sessions of the reference harness, in connection order.
pub fn harness_roster() -> Vec<(&'static str, RideContext)> {
    vec![
        ("user-active-1", active_user()),
        ("driver-active-1", active_driver()),
        ("driver-available-1", available_driver()),
        ("user-searching-1", searching_user()),
        ("user-inactive-1", idle_user()),
    ]
}
