//! # Bwrs Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, expands and validates the settings that describe the managed
//! container: its name, image, the `DOMAIN` value handed to the server,
//! the host data directory and the published port.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or `BWRS_CONFIG`). It must exist.
//! 2. The user file `config.toml` in the platform config directory for `bwrs`.
//! 3. Default values defined in the code.
//!
//! After loading, `~` in the data directory is expanded and the result is
//! validated. The trailing-separator rule for the data directory is left to
//! `start`, which is the only operation that mounts it.
//!
//! ## Examples
//!
//! ```toml
//! [service]
//! container_name = "bitwarden_rs"
//! image = "bitwardenrs/server:latest"
//! domain = "https://vault.example.com"
//! data_dir = "/bw-data/"
//! host_port = 8881
//!
//! [lifecycle]
//! restart_grace_secs = 2
//! ```
//!
use crate::core::error::{BwrsError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, MAIN_SEPARATOR},
    time::Duration,
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

/// What to run and how to expose it.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name of the managed container. Assumed unique on the host.
    #[serde(default = "default_container_name")]
    pub container_name: String,
    /// Image reference pulled on every start.
    #[serde(default = "default_image")]
    pub image: String,
    /// Public URL of the vault, exported as `DOMAIN`.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Host directory bind-mounted into the container (can use ~).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Host port published for the web vault.
    #[serde(default = "default_host_port")]
    pub host_port: u16,
    /// Path of the data directory inside the container.
    #[serde(default = "default_container_data_path")]
    pub container_data_path: String,
    /// Port the server listens on inside the container (tcp).
    #[serde(default = "default_container_port")]
    pub container_port: u16,
}

/// Timing knobs for stop and restart.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Pause between stop and start during `restart`.
    #[serde(default = "default_restart_grace_secs")]
    pub restart_grace_secs: u64,
    /// Seconds Docker waits before killing on stop. `None` keeps the engine default.
    #[serde(default)]
    pub stop_timeout_secs: Option<u32>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            container_name: default_container_name(),
            image: default_image(),
            domain: default_domain(),
            data_dir: default_data_dir(),
            host_port: default_host_port(),
            container_data_path: default_container_data_path(),
            container_port: default_container_port(),
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            restart_grace_secs: default_restart_grace_secs(),
            stop_timeout_secs: None,
        }
    }
}

impl LifecycleConfig {
    pub fn restart_grace(&self) -> Duration {
        Duration::from_secs(self.restart_grace_secs)
    }
}

fn default_container_name() -> String {
    "bitwarden_rs".to_string()
}
fn default_image() -> String {
    "bitwardenrs/server:latest".to_string()
}
fn default_domain() -> String {
    "https://vault.example.com".to_string()
}
fn default_data_dir() -> String {
    "/bw-data/".to_string()
}
fn default_host_port() -> u16 {
    8881
}
fn default_container_data_path() -> String {
    "/data/".to_string()
}
fn default_container_port() -> u16 {
    80
}
fn default_restart_grace_secs() -> u64 {
    2
}

const USER_CONFIG_FILENAME: &str = "config.toml";

/// Loads the effective configuration.
///
/// `explicit` is the `--config` / `BWRS_CONFIG` path; when given, the file
/// must exist and the user config file is not consulted.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "bwrs") {
        let config_path = proj_dirs.config_dir().join(USER_CONFIG_FILENAME);
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}, using defaults",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory, using defaults.");
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    config.service.data_dir = shellexpand::tilde(&config.service.data_dir).into_owned();
    debug!("Expanded data directory: {}", config.service.data_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    let service = &config.service;
    let required = [
        ("container_name", &service.container_name),
        ("image", &service.image),
        ("domain", &service.domain),
        ("container_data_path", &service.container_data_path),
    ];
    for (key, value) in required {
        if value.trim().is_empty() {
            return Err(anyhow!(BwrsError::Config(format!(
                "'service.{}' must not be empty.",
                key
            ))));
        }
    }
    if service.host_port == 0 || service.container_port == 0 {
        return Err(anyhow!(BwrsError::Config(
            "'service.host_port' and 'service.container_port' must be non-zero.".to_string()
        )));
    }
    Ok(())
}

/// Checks the host data directory before it is bind-mounted.
///
/// The path must be absolute and end with a path separator.
pub fn validate_data_dir(data_dir: &str) -> Result<()> {
    if !data_dir.ends_with('/') && !data_dir.ends_with(MAIN_SEPARATOR) {
        return Err(anyhow!(BwrsError::Config(format!(
            "Invalid data directory '{}': must end with a path separator.",
            data_dir
        ))));
    }
    if !Path::new(data_dir).is_absolute() {
        return Err(anyhow!(BwrsError::Config(format!(
            "Invalid data directory '{}': must be an absolute path.",
            data_dir
        ))));
    }
    Ok(())
}
