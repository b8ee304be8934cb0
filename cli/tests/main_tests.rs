//! # Bwrs CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behavior of the `bwrs` binary that needs no Docker daemon:
//! standard flags, rejection of unknown operations, and failures that happen
//! before any engine call (bad configuration files).
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_operations() {
    bwrs_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("purge"))
        .stdout(predicate::str::contains("restart"));
}

#[test]
fn test_version_flag() {
    bwrs_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_operation_is_usage_error() {
    bwrs_cmd()
        .arg("init")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'init'"));
}

#[test]
fn test_missing_operation_is_usage_error() {
    bwrs_cmd()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_config_file() {
    bwrs_cmd()
        .args(["status", "--config", "/nonexistent/bwrs.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Failed to read configuration file",
        ));
}

#[test]
fn test_invalid_config_from_env() {
    let config = config_file("[service]\nhost_port = 0\n");
    bwrs_cmd()
        .env("BWRS_CONFIG", config.path())
        .arg("status")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Configuration validation failed",
        ));
}

#[test]
fn test_unknown_config_key() {
    let config = config_file("[service]\nport = 8881\n");
    bwrs_cmd()
        .args(["stop", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse TOML"));
}

/// The data directory is checked before the Docker client is built, so these
/// fail the same way with or without a daemon.
#[test]
fn test_start_rejects_data_dir_without_separator() {
    let config = config_file("[service]\ndata_dir = \"/bw-data\"\n");
    bwrs_cmd()
        .args(["start", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must end with a path separator"))
        .stderr(predicate::str::contains("Docker daemon").not());
}

#[test]
fn test_restart_rejects_data_dir_without_separator() {
    let config = config_file("[service]\ndata_dir = \"/bw-data\"\n");
    bwrs_cmd()
        .args(["restart", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("must end with a path separator"));
}

#[test]
fn test_error_line_includes_cause() {
    let config = config_file("[service]\ndomain = \"\"\n");
    bwrs_cmd()
        .args(["status", "--config"])
        .arg(config.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Configuration validation failed: Configuration error: 'service.domain' must not be empty.",
        ));
}

/// Requires a running Docker daemon and registry access.
#[test]
#[ignore]
fn test_status_against_live_daemon() {
    let config = config_file("[service]\ncontainer_name = \"bwrs-it-absent\"\n");
    bwrs_cmd()
        .args(["status", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::diff("Not running.\n"));
}
