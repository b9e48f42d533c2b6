//! Handler for `check config`.

use std::path::Path;

use crate::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate a configuration file without starting the manager.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    println!("Checking configuration: {}", path.display());

    let config = Config::load(path)?;
    output::ok("Configuration file is valid");

    let manager = &config.manager;
    output::section("Summary");
    output::key_value("Realtime slots", manager.max_connections);
    output::key_value("Frequent poll", format!("{} ms", manager.frequent_poll_ms));
    output::key_value("Occasional poll", format!("{} ms", manager.occasional_poll_ms));
    output::key_value("Min hold time", format!("{} ms", manager.min_hold_time_ms));
    output::key_value("Rebalance every", format!("{} ms", manager.rebalance_interval_ms));
    output::key_value("Log level", &config.logging.level);

    if manager.min_hold_time_ms == 0 {
        output::warn("min_hold_time_ms is 0; slots may change hands on every call");
    }
    if manager.rebalance_interval_ms > manager.occasional_poll_ms {
        output::warn("rebalance interval is longer than the slowest poll cadence");
    }
    println!();
    Ok(())
}
