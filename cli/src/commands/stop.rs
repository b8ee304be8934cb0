//! # Bwrs Stop Operation
//!
//! File: cli/src/commands/stop.rs
//!
//! ## Overview
//!
//! Stops the running vault container. The container is kept (use `purge`
//! to remove it), so a later `start` brings the same container back.
//!
use super::controller::LifecycleController;
use crate::common::docker::{ContainerEngine, ContainerRef};
use crate::core::error::Result;
use std::fmt;
use tracing::{info, instrument};

/// The container that was stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReport {
    pub container: ContainerRef,
}

impl fmt::Display for StopReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.container.id)
    }
}

impl<E: ContainerEngine> LifecycleController<E> {
    /// Stops the running container with the configured name.
    ///
    /// Fails with `NotFound` when nothing by that name is running.
    #[instrument(skip(self), fields(container = %self.container_name()))]
    pub async fn stop(&self) -> Result<StopReport> {
        let running = self
            .engine
            .list_containers(self.container_name(), false)
            .await?;
        let container = self.single_match(running)?;

        self.engine
            .stop_container(&container.id, self.config.lifecycle.stop_timeout_secs)
            .await?;
        info!("Stopped container {}", container.short_id);

        Ok(StopReport { container })
    }
}
