//! # Bwrs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and builds its commands through `bwrs_cmd()`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

/// # Get Bwrs Command (`bwrs_cmd`)
///
/// An `assert_cmd::Command` for the compiled `bwrs` binary with a clean
/// logging environment, so assertions on stderr are not polluted by
/// `RUST_LOG` from the developer's shell.
///
/// ## Panics
/// Panics if the `bwrs` binary cannot be found via `Command::cargo_bin`.
pub fn bwrs_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bwrs").expect("Failed to find bwrs binary for testing");
    cmd.env_remove("RUST_LOG").env_remove("BWRS_CONFIG");
    cmd
}

/// Writes `contents` to a temporary TOML file that lives as long as the handle.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}
