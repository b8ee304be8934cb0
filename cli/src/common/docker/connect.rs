//! # Bwrs Docker Connection
//!
//! File: cli/src/common/docker/connect.rs
//!
//! ## Overview
//!
//! Opens the client connection to the local Docker daemon. Called once by
//! the entry point; the resulting client is wrapped in a `BollardEngine` and
//! handed to the lifecycle controller.
//!
//! ```rust
//! let engine = BollardEngine::new(connect_docker().await?);
//! ```
//!
use crate::core::error::{BwrsError, Result};
use anyhow::{anyhow, Context};
use bollard::Docker;
use tracing::{debug, instrument};

/// Establishes a connection to the local Docker daemon using default settings.
///
/// Uses `bollard::Docker::connect_with_local_defaults`, which honours
/// `DOCKER_HOST` and otherwise falls back to `/var/run/docker.sock` on Unix
/// or the named pipe on Windows. A missing local socket fails here; a daemon
/// that exists but does not answer surfaces on the first API call.
///
/// # Errors
///
/// Returns `BwrsError::DockerApi` (with context) if the client cannot be
/// configured, including when the local socket does not exist.
#[instrument]
pub async fn connect_docker() -> Result<Docker> {
    let docker = Docker::connect_with_local_defaults()
        .map_err(|e| anyhow!(BwrsError::DockerApi { source: e }))
        .context("Failed to connect to Docker daemon. Is it running and accessible?")?;
    debug!("Docker client configured with local defaults.");
    Ok(docker)
}
