//! Hybrid Realtime - live-slot scheduling for ride-hailing sessions.
//!
//! A backend plan caps how many realtime subscriptions may be open at once.
//! This crate decides, for every connected user and driver session, whether
//! it holds one of those slots or is served by interval polling, and keeps
//! the slots with the sessions that need them most.
//!
//! # Architecture
//!
//! - **`domain`** - Plain data: participant ids, ride contexts, the
//!   [`Tier`](domain::Tier) priority scorer, snapshots and stats.
//! - **`infrastructure::realtime`** - [`RealtimeManager`](infrastructure::realtime::RealtimeManager),
//!   the admission controller, with its slot pool, polling scheduler,
//!   rebalance pass and periodic rebalance task.
//! - **`infrastructure::config`** - TOML configuration and logging setup.
//! - **`cli`** - The `hybrid-realtime` binary's commands.
//!
//! # Priority tiers
//!
//! | Tier | Who | Polling cadence |
//! |------|-----|-----------------|
//! | 0 | anyone on an active ride | never demoted by choice |
//! | 1 | available driver | frequent (15 s) |
//! | 2 | searching user | frequent (15 s) |
//! | 3 | everyone else | occasional (30 s) |
//!
//! # Example
//!
//! ```
//! use hybrid_realtime::domain::{RideContext, Role};
//! use hybrid_realtime::infrastructure::config::manager::ManagerConfig;
//! use hybrid_realtime::infrastructure::realtime::RealtimeManager;
//!
//! let manager = RealtimeManager::new(ManagerConfig::default());
//! manager.connect_user("user-active-1", RideContext::on_ride(Role::User));
//! manager.connect_user("driver-active-1", RideContext::on_ride(Role::Driver));
//! manager.connect_user("driver-available-1", RideContext::available_driver());
//!
//! let stats = manager.get_stats();
//! assert_eq!(stats.active_connections, 2);
//! assert_eq!(stats.polling_users, 1);
//!
//! manager.disconnect_user("user-active-1");
//! assert!(manager.is_realtime("driver-available-1"));
//! ```

pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
