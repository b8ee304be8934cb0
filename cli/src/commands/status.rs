//! # Bwrs Status Operation
//!
//! File: cli/src/commands/status.rs
//!
//! ## Overview
//!
//! Reports whether the vault container is running. Every running container
//! with the configured name is listed, so an accidental duplicate shows up
//! here instead of being hidden.
//!
use super::controller::LifecycleController;
use crate::common::docker::{ContainerEngine, ContainerRef};
use crate::core::error::Result;
use std::fmt;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub running: Vec<ContainerRef>,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.running.is_empty() {
            return write!(f, "Not running.");
        }
        let lines: Vec<String> = self
            .running
            .iter()
            .map(|c| format!("{}: {}", c.name, c.id))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

impl<E: ContainerEngine> LifecycleController<E> {
    #[instrument(skip(self), fields(container = %self.container_name()))]
    pub async fn status(&self) -> Result<StatusReport> {
        let running = self
            .engine
            .list_containers(self.container_name(), false)
            .await?;
        Ok(StatusReport { running })
    }
}
