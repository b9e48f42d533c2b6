//! Infrastructure layer.
//!
//! Provides the stateful machinery around the domain types: configuration
//! loading and the realtime connection manager.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`realtime`] - Slot pool, admission, polling cadences and rebalancing

pub mod config;
pub mod realtime;
