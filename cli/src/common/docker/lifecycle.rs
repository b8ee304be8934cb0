//! # Bwrs Docker Container Lifecycle
//!
//! File: cli/src/common/docker/lifecycle.rs
//!
//! ## Overview
//!
//! Start, stop and remove calls for an existing container, with the Docker
//! status codes mapped onto `BwrsError`:
//!
//! | Code | start / stop              | remove                     |
//! |------|---------------------------|----------------------------|
//! | 304  | already in that state, Ok | n/a                        |
//! | 404  | `NotFound`                | `NotFound`                 |
//! | 409  | n/a                       | `DockerOperation` conflict |
//! | else | `DockerApi`               | `DockerApi`                |
//!
use crate::core::error::{BwrsError, Result};
use anyhow::anyhow;
use bollard::{
    container::{RemoveContainerOptions, StartContainerOptions, StopContainerOptions},
    Docker,
};
use tracing::{error, info, instrument, warn};

/// Starts an existing, stopped container by id or name.
///
/// Already-running containers (Docker 304) are treated as success.
///
/// # Errors
///
/// * `BwrsError::NotFound` - If the container does not exist (Docker 404).
/// * `BwrsError::DockerApi` - For other errors during communication with the Docker daemon.
#[instrument(skip(docker))]
pub async fn start_container(docker: &Docker, name_or_id: &str) -> Result<()> {
    info!("Starting container '{}'...", name_or_id);

    match docker
        .start_container(name_or_id, None::<StartContainerOptions<String>>)
        .await
    {
        Ok(_) => {
            info!("Container '{}' started.", name_or_id);
            Ok(())
        }
        // 304 means "Not Modified": the container is already running.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            info!("Container '{}' was already started.", name_or_id);
            Ok(())
        }
        // 404: no container with this id or name.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            warn!("Start failed: container '{}' not found.", name_or_id);
            Err(anyhow!(BwrsError::NotFound {
                name: name_or_id.to_string()
            }))
        }
        Err(e) => {
            error!("Failed to start container '{}': {:?}", name_or_id, e);
            Err(anyhow!(BwrsError::DockerApi { source: e })
                .context(format!("Failed to start container '{}'", name_or_id)))
        }
    }
}

/// Stops a running container by id or name.
///
/// Sends SIGTERM and waits `timeout_secs` (Docker's default of 10 seconds when
/// `None`) before the daemon kills the container. A container that is already
/// stopped (Docker 304) counts as success.
///
/// # Errors
///
/// * `BwrsError::NotFound` - If the container does not exist (Docker 404).
/// * `BwrsError::DockerApi` - For other errors during communication with the Docker daemon.
#[instrument(skip(docker))]
pub async fn stop_container(
    docker: &Docker,
    name_or_id: &str,
    timeout_secs: Option<u32>,
) -> Result<()> {
    // No options lets the daemon apply its own grace period.
    let options = timeout_secs.map(|t| StopContainerOptions { t: i64::from(t) });
    info!(
        "Stopping container '{}' (timeout: {})...",
        name_or_id,
        timeout_secs.map_or_else(|| "engine default".to_string(), |t| format!("{}s", t))
    );

    match docker.stop_container(name_or_id, options).await {
        Ok(_) => {
            info!("Container '{}' stopped.", name_or_id);
            Ok(())
        }
        // 304: already stopped, nothing to do.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 304, ..
        }) => {
            info!("Container '{}' was already stopped.", name_or_id);
            Ok(())
        }
        // 404: no container with this id or name.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            warn!("Stop failed: container '{}' not found.", name_or_id);
            Err(anyhow!(BwrsError::NotFound {
                name: name_or_id.to_string()
            }))
        }
        Err(e) => {
            error!("Failed to stop container '{}': {:?}", name_or_id, e);
            Err(anyhow!(BwrsError::DockerApi { source: e })
                .context(format!("Failed to stop container '{}'", name_or_id)))
        }
    }
}

/// Removes a stopped container by id or name.
///
/// Removal is never forced and anonymous volumes are kept; bind-mounted host
/// directories are outside the container's writable layer and stay intact.
///
/// # Errors
///
/// * `BwrsError::NotFound` - If the container does not exist (Docker 404).
/// * `BwrsError::DockerOperation` - If Docker refuses the removal (409, e.g. still running).
/// * `BwrsError::DockerApi` - For other errors during communication with the Docker daemon.
#[instrument(skip(docker))]
pub async fn remove_container(docker: &Docker, name_or_id: &str) -> Result<()> {
    info!("Removing container '{}'...", name_or_id);
    // Never force: a running container must be stopped by the caller first.
    let options = Some(RemoveContainerOptions {
        force: false,
        v: false,
        link: false,
    });

    match docker.remove_container(name_or_id, options).await {
        Ok(_) => {
            info!("Container '{}' removed.", name_or_id);
            Ok(())
        }
        // 404: no container with this id or name.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        }) => {
            warn!("Remove failed: container '{}' not found.", name_or_id);
            Err(anyhow!(BwrsError::NotFound {
                name: name_or_id.to_string()
            }))
        }
        // 409: the daemon refuses, usually because the container is running.
        Err(bollard::errors::Error::DockerResponseServerError {
            status_code: 409,
            message,
        }) => {
            error!("Conflict removing container '{}': {}", name_or_id, message);
            Err(anyhow!(BwrsError::DockerOperation(format!(
                "Conflict removing container '{}': {}",
                name_or_id, message
            ))))
        }
        Err(e) => {
            error!("Failed to remove container '{}': {:?}", name_or_id, e);
            Err(anyhow!(BwrsError::DockerApi { source: e })
                .context(format!("Failed to remove container '{}'", name_or_id)))
        }
    }
}
