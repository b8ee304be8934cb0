//! # Bwrs Restart Operation
//!
//! File: cli/src/commands/restart.rs
//!
//! ## Overview
//!
//! `stop`, a short pause (`lifecycle.restart_grace_secs`, 2 seconds by
//! default), then `start`. Errors are not swallowed: if nothing is running,
//! the `NotFound` from `stop` is returned and `start` is never attempted.
//!
use super::controller::LifecycleController;
use super::start::StartReport;
use super::stop::StopReport;
use crate::common::docker::ContainerEngine;
use crate::core::error::Result;
use std::fmt;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestartReport {
    pub stop: StopReport,
    pub start: StartReport,
}

impl fmt::Display for RestartReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.stop)?;
        write!(f, "{}", self.start)
    }
}

impl<E: ContainerEngine> LifecycleController<E> {
    #[instrument(skip(self), fields(container = %self.container_name()))]
    pub async fn restart(&self) -> Result<RestartReport> {
        let stop = self.stop().await?;

        let grace = self.config.lifecycle.restart_grace();
        debug!("Waiting {:?} before starting again", grace);
        tokio::time::sleep(grace).await;

        let start = self.start().await?;
        Ok(RestartReport { stop, start })
    }
}
