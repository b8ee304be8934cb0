//! # Bwrs Docker Container Creation
//!
//! File: cli/src/common/docker/operations.rs
//!
//! ## Overview
//!
//! Creates and starts a brand-new container from a `RunSpec`. This is the
//! `docker run -d --name ... -e ... -v ... -p ...` path taken by `start`
//! when no container with the configured name exists yet.
//!
//! ## Architecture
//!
//! 1. `container_config` translates the `RunSpec` into bollard's
//!    `Config`/`HostConfig` (env list, `binds`, exposed ports and bindings).
//! 2. `create_container` is called with the configured name.
//! 3. The new container is started; for a detached run nothing is attached.
//!
use crate::core::error::{BwrsError, Result};
use anyhow::{anyhow, Context};
use bollard::{
    container::{Config as ContainerConfig, CreateContainerOptions},
    models::{HostConfig, PortBinding},
    Docker,
};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

use super::engine::{ContainerRef, RunSpec};
use super::lifecycle::start_container;

/// Creates and starts a new container described by `spec`.
///
/// # Returns
///
/// * `Result<ContainerRef>` - The id and name of the container that was created.
///
/// # Errors
///
/// * `BwrsError::DockerOperation` - If a container with the same name already exists (409)
///   or the image is missing locally (404).
/// * `BwrsError::DockerApi` - For other create/start failures.
#[instrument(skip(docker, spec), fields(container = %spec.name, image = %spec.image))]
pub async fn run_container(docker: &Docker, spec: &RunSpec) -> Result<ContainerRef> {
    let config = container_config(spec);
    debug!("Container config: {:?}", config);

    info!("Creating container '{}' from image '{}'", spec.name, spec.image);
    let create_options = Some(CreateContainerOptions {
        name: spec.name.clone(),
        platform: None,
    });

    let created = docker
        .create_container(create_options, config)
        .await
        .map_err(|e| match e {
            // 409: the name is taken, possibly by a container created meanwhile.
            bollard::errors::Error::DockerResponseServerError {
                status_code: 409,
                message,
            } => {
                error!("Conflict creating container '{}': {}", spec.name, message);
                anyhow!(BwrsError::DockerOperation(format!(
                    "Container named '{}' already exists: {}",
                    spec.name, message
                )))
            }
            // 404 on create refers to the image, not the container.
            bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            } => anyhow!(BwrsError::DockerOperation(format!(
                "Image '{}' not found locally",
                spec.image
            ))),
            _ => anyhow!(BwrsError::DockerApi { source: e })
                .context(format!("Failed to create container '{}'", spec.name)),
        })?;

    for warning in &created.warnings {
        warn!("Docker warning while creating '{}': {}", spec.name, warning);
    }

    // Create does not start; the container stays in "created" until this call.
    start_container(docker, &created.id)
        .await
        .with_context(|| format!("Created container '{}' but failed to start it", spec.name))?;

    info!("Container '{}' is running ({})", spec.name, created.id);
    Ok(ContainerRef::new(created.id, spec.name.as_str()))
}

/// Builds the create-container request body for `spec`.
fn container_config(spec: &RunSpec) -> ContainerConfig<String> {
    let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();
    let mut port_bindings: HashMap<String, Option<Vec<PortBinding>>> = HashMap::new();
    for mapping in &spec.ports {
        let key = mapping.container_key();
        exposed_ports.insert(key.clone(), HashMap::new());
        port_bindings
            .entry(key)
            .or_default()
            .get_or_insert_with(Vec::new)
            .push(PortBinding {
                host_ip: None,
                host_port: Some(mapping.host_port.to_string()),
            });
    }

    let binds: Vec<String> = spec.binds.iter().map(ToString::to_string).collect();

    let host_config = HostConfig {
        binds: (!binds.is_empty()).then_some(binds),
        port_bindings: (!port_bindings.is_empty()).then_some(port_bindings),
        ..Default::default()
    };

    let attach = !spec.detach;
    ContainerConfig {
        image: Some(spec.image.clone()),
        env: (!spec.env.is_empty()).then(|| spec.env.clone()),
        exposed_ports: (!exposed_ports.is_empty()).then_some(exposed_ports),
        host_config: Some(host_config),
        attach_stdout: Some(attach),
        attach_stderr: Some(attach),
        ..Default::default()
    }
}
