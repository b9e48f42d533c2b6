use std::io::Write;
use std::time::Duration;

use hybrid_realtime::error::{ConfigError, Error};
use hybrid_realtime::infrastructure::config::logging::LogFormat;
use hybrid_realtime::infrastructure::config::settings::Config;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_full_file() {
    let file = write_temp_config(
        r#"
[manager]
max_connections = 4
frequent_poll_ms = 10000
occasional_poll_ms = 60000
min_hold_time_ms = 2000
rebalance_interval_ms = 5000
event_capacity = 64

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(file.path()).expect("valid config");
    assert_eq!(config.manager.max_connections, 4);
    assert_eq!(config.manager.cadence().frequent, Duration::from_secs(10));
    assert_eq!(config.manager.cadence().occasional, Duration::from_secs(60));
    assert_eq!(config.manager.min_hold_time(), Duration::from_secs(2));
    assert_eq!(config.manager.rebalance_interval(), Duration::from_secs(5));
    assert_eq!(config.manager.event_capacity, 64);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn config_partial_manager_section_keeps_defaults() {
    let file = write_temp_config("[manager]\nmax_connections = 3\n");

    let config = Config::load(file.path()).expect("valid config");
    assert_eq!(config.manager.max_connections, 3);
    assert_eq!(config.manager.frequent_poll_ms, 15_000);
    assert_eq!(config.manager.occasional_poll_ms, 30_000);
    assert_eq!(config.manager.min_hold_time_ms, 5_000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn config_rejects_zero_slots() {
    let file = write_temp_config("[manager]\nmax_connections = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "max_connections",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid max_connections error, got {err}"),
        Ok(config) => panic!(
            "Expected zero slots to be rejected, got {}",
            config.manager.max_connections
        ),
    }
}

#[test]
fn config_rejects_inverted_cadences() {
    let file = write_temp_config(
        "[manager]\nfrequent_poll_ms = 30000\noccasional_poll_ms = 15000\n",
    );

    assert!(
        matches!(
            Config::load(file.path()),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "occasional_poll_ms",
                ..
            }))
        ),
        "Expected occasional cadence shorter than frequent to be rejected"
    );
}

#[test]
fn config_rejects_empty_log_level() {
    let file = write_temp_config("[logging]\nlevel = \"  \"\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::MissingField { field: "level" }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let file = write_temp_config("[manager\nmax_connections = 2\n");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = Config::load(&path).expect_err("missing file");
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    assert!(err.to_string().starts_with("failed to read config file"));
}
