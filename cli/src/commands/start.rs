//! # Bwrs Start Operation
//!
//! File: cli/src/commands/start.rs
//!
//! ## Overview
//!
//! Brings the vault container up, reusing an existing stopped container when
//! there is one and creating a fresh one otherwise.
//!
//! ## Workflow
//!
//! 1. Reject a data directory that is relative or lacks a trailing separator.
//!    Nothing is sent to the engine in that case.
//! 2. Refuse if a container with the configured name is already running.
//! 3. Pull the configured image and resolve its id.
//! 4. Look up the name across all states:
//!    - one stopped container: start it as it was created (same mounts, ports, env);
//!    - none: create and start a detached container with `DOMAIN`, the data
//!      bind mount and the port mapping;
//!    - several: fail, since it is unclear which one is the vault.
//!
use super::controller::LifecycleController;
use crate::common::docker::{
    images::image_short_id, BindMount, ContainerEngine, ContainerRef, PortMapping, RunSpec,
};
use crate::core::{
    config::validate_data_dir,
    error::{BwrsError, Result},
};
use anyhow::anyhow;
use std::fmt;
use tracing::{info, instrument};

/// What `start` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    pub image_short_id: String,
    pub container: ContainerRef,
    /// `true` when a new container was created, `false` when a stopped one was reused.
    pub created: bool,
}

impl fmt::Display for StartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IMAGE: {}", self.image_short_id)?;
        write!(f, "{}: {}", self.container.name, self.container.short_id)
    }
}

impl<E: ContainerEngine> LifecycleController<E> {
    #[instrument(skip(self), fields(container = %self.container_name()))]
    pub async fn start(&self) -> Result<StartReport> {
        let service = &self.config.service;
        validate_data_dir(&service.data_dir)?;

        let running = self
            .engine
            .list_containers(&service.container_name, false)
            .await?;
        if !running.is_empty() {
            return Err(anyhow!(BwrsError::AlreadyRunning {
                name: service.container_name.clone()
            }));
        }

        self.engine.pull_image(&service.image).await?;
        let image_short_id = image_short_id(&self.engine.image_id(&service.image).await?);
        info!("Using image {} ({})", service.image, image_short_id);

        let existing = self
            .engine
            .list_containers(&service.container_name, true)
            .await?;

        let (container, created) = if existing.is_empty() {
            let container = self.engine.run_container(&self.run_spec()).await?;
            info!("Created container {}", container.short_id);
            (container, true)
        } else {
            let container = self.single_match(existing)?;
            self.engine.start_container(&container.id).await?;
            info!("Started existing container {}", container.short_id);
            (container, false)
        };

        Ok(StartReport {
            image_short_id,
            container,
            created,
        })
    }

    /// The `docker run` equivalent for a first start.
    pub(super) fn run_spec(&self) -> RunSpec {
        let service = &self.config.service;
        RunSpec {
            image: service.image.clone(),
            name: service.container_name.clone(),
            env: vec![format!("DOMAIN={}", service.domain)],
            binds: vec![BindMount {
                host: service.data_dir.clone(),
                container: service.container_data_path.clone(),
                read_only: false,
            }],
            ports: vec![PortMapping::tcp(service.container_port, service.host_port)],
            detach: true,
        }
    }
}
