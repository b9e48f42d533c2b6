//! CLI integration tests.

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn hybrid_realtime() -> Command {
    cargo_bin_cmd!("hybrid-realtime")
}

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_help() {
    hybrid_realtime()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hybrid-realtime"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    hybrid_realtime()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("hybrid-realtime"));
}

#[test]
fn check_config_accepts_valid_file() {
    let file = write_temp_config("[manager]\nmax_connections = 3\n");

    hybrid_realtime()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file is valid"))
        .stdout(predicate::str::contains("Realtime slots"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let file = write_temp_config(concat!(
        "[manager]\n",
        "max_connections = 0\n",
        "\n",
        "[logging]\n",
        "level = \"info\"\n",
        "format = \"pretty\"\n",
    ));

    let output = hybrid_realtime()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .output()
        .expect("run hybrid-realtime");

    assert!(!output.status.success(), "Expected nonzero exit code");

    // Check both stdout and stderr for the error message
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}{stderr}");
    assert!(
        combined.contains("max_connections"),
        "Expected error message about invalid config.\nstdout: {stdout}\nstderr: {stderr}"
    );
}

#[test]
fn simulate_replays_reference_scenario() {
    hybrid_realtime()
        .arg("simulate")
        .assert()
        .success()
        .stdout(predicate::str::contains("connect user-active-1"))
        .stdout(predicate::str::contains("driver-available-1"))
        .stdout(predicate::str::contains("rebalance"))
        .stdout(predicate::str::contains("Free slots"))
        .stdout(predicate::str::contains("Scenario complete"));
}

#[test]
fn simulate_flags_under_served_rides_with_one_slot() {
    hybrid_realtime()
        .args(["simulate", "--max-connections", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("under-served"));
}

#[test]
fn simulate_rejects_zero_slot_override() {
    hybrid_realtime()
        .args(["simulate", "--max-connections", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_connections"));
}

#[test]
fn run_rejects_zero_slot_override() {
    hybrid_realtime()
        .args(["run", "--max-connections", "0"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_connections"));
}

#[test]
fn run_tracks_unrecognized_roles() {
    let input = concat!(
        r#"{"op":"connect","id":"x","context":{"role":"admin","hasActiveRide":true}}"#,
        "\n",
        r#"{"op":"stats"}"#,
        "\n",
    );

    hybrid_realtime()
        .args(["run", "--log-level", "error"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tier":"active_ride""#))
        .stdout(predicate::str::contains(r#""totalUsers":1"#));
}

#[test]
fn run_answers_each_command_line() {
    let input = concat!(
        r#"{"op":"connect","id":"rider","context":{"role":"user","hasActiveRide":true}}"#,
        "\n",
        r#"{"op":"connect","id":"idle","context":{"role":"user"}}"#,
        "\n",
        r#"{"op":"stats"}"#,
        "\n",
        "not json\n",
        r#"{"op":"participant","id":"ghost"}"#,
        "\n",
    );

    hybrid_realtime()
        .args(["run", "--max-connections", "1", "--log-level", "error"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""mode":"realtime""#))
        .stdout(predicate::str::contains(r#""mode":"polling""#))
        .stdout(predicate::str::contains(r#""activeConnections":1"#))
        .stdout(predicate::str::contains("malformed command"))
        .stdout(predicate::str::contains("unknown participant: ghost"));
}

#[test]
fn run_streams_mode_changes() {
    let input = concat!(
        r#"{"op":"connect","id":"driver-1","context":{"role":"driver","isAvailable":true}}"#,
        "\n",
        r#"{"op":"disconnect","id":"driver-1"}"#,
        "\n",
    );

    hybrid_realtime()
        .args(["run", "--log-level", "error"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""event":"realtime""#))
        .stdout(predicate::str::contains(r#""event":"removed""#));
}

#[test]
fn run_writes_command_events_before_reply() {
    let input = concat!(
        r#"{"op":"connect","id":"a","context":{"role":"user"}}"#,
        "\n",
        r#"{"op":"connect","id":"b","context":{"role":"user"}}"#,
        "\n",
        r#"{"op":"stats"}"#,
        "\n",
    );

    let output = hybrid_realtime()
        .args(["run", "--max-connections", "1", "--log-level", "error"])
        .write_stdin(input)
        .output()
        .expect("run hybrid-realtime");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "unexpected output: {stdout}");
    assert!(lines[0].contains(r#""event":"realtime""#));
    assert!(lines[1].contains(r#""ok":true"#));
    assert!(lines[2].contains(r#""event":"polling""#));
    assert!(lines[3].contains(r#""ok":true"#));
    assert!(lines[4].contains(r#""stats""#));
}

#[test]
fn run_rejects_invalid_config_file() {
    let file = write_temp_config("[manager]\nevent_capacity = 0\n");

    hybrid_realtime()
        .args(["run", "--config"])
        .arg(file.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("event_capacity"));
}
