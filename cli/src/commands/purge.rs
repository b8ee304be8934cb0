//! # Bwrs Purge Operation
//!
//! File: cli/src/commands/purge.rs
//!
//! ## Overview
//!
//! Removes the vault container for good. A running container is stopped
//! first; a stopped one is looked up across all states and removed directly.
//! The host data directory is a bind mount, so the vault data survives and
//! the next `start` creates a fresh container over it.
//!
use super::controller::LifecycleController;
use crate::common::docker::{ContainerEngine, ContainerRef};
use crate::core::error::{is_not_found, Result};
use std::fmt;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    pub container: ContainerRef,
    /// Whether the container had to be stopped first.
    pub stopped: bool,
}

impl fmt::Display for PurgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stopped {
            writeln!(f, "{}", self.container.id)?;
        }
        write!(
            f,
            "Removed {} ({})",
            self.container.name, self.container.short_id
        )
    }
}

impl<E: ContainerEngine> LifecycleController<E> {
    #[instrument(skip(self), fields(container = %self.container_name()))]
    pub async fn purge(&self) -> Result<PurgeReport> {
        let (container, stopped) = match self.stop().await {
            Ok(report) => (report.container, true),
            Err(e) if is_not_found(&e) => {
                debug!("Not running, looking for a stopped container instead");
                let all = self
                    .engine
                    .list_containers(self.container_name(), true)
                    .await?;
                (self.single_match(all)?, false)
            }
            Err(e) => return Err(e),
        };

        self.engine.remove_container(&container.id).await?;
        info!("Removed container {}", container.short_id);

        Ok(PurgeReport { container, stopped })
    }
}
