//! # Bwrs Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The five lifecycle operations and their dispatch:
//!
//! - `start`: pull the image, then start the existing container or create one
//! - `stop`: stop the running container
//! - `status`: list running containers with the configured name
//! - `purge`: stop if needed, then remove the container (data stays on the host)
//! - `restart`: stop, pause, start
//!
//! ## Architecture
//!
//! Each operation is an `impl` block on `controller::LifecycleController` in
//! its own module and returns a report type whose `Display` is what the
//! operator sees. `Operation` is the CLI-facing enum and `dispatch` maps it
//! onto the controller with an exhaustive `match`.
//!
use crate::common::docker::ContainerEngine;
use crate::core::config::{validate_data_dir, Config};
use crate::core::error::Result;
use clap::ValueEnum;
use std::fmt;

pub mod controller;
pub mod purge;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;

pub use controller::LifecycleController;

/// Operation selected on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Pull the image and start the container (reusing a stopped one)
    Start,
    /// Stop the running container
    Stop,
    /// Show whether the container is running
    Status,
    /// Stop and remove the container; host data is kept
    Purge,
    /// Stop, wait briefly, then start again
    Restart,
}

impl Operation {
    /// Whether the operation ends up bind-mounting the host data directory.
    pub fn mounts_data_dir(self) -> bool {
        matches!(self, Operation::Start | Operation::Restart)
    }

    /// Configuration checks that must pass before the Docker client is built.
    ///
    /// `start` repeats the data directory check; this copy only makes sure a
    /// bad path is reported as such on hosts without a reachable daemon, and
    /// that `restart` fails before it stops anything.
    pub fn preflight(self, config: &Config) -> Result<()> {
        if self.mounts_data_dir() {
            validate_data_dir(&config.service.data_dir)?;
        }
        Ok(())
    }
}

/// Result of a dispatched operation, printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Start(start::StartReport),
    Stop(stop::StopReport),
    Status(status::StatusReport),
    Purge(purge::PurgeReport),
    Restart(restart::RestartReport),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Start(r) => fmt::Display::fmt(r, f),
            Outcome::Stop(r) => fmt::Display::fmt(r, f),
            Outcome::Status(r) => fmt::Display::fmt(r, f),
            Outcome::Purge(r) => fmt::Display::fmt(r, f),
            Outcome::Restart(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Runs `operation` against `controller`.
pub async fn dispatch<E: ContainerEngine>(
    controller: &LifecycleController<E>,
    operation: Operation,
) -> Result<Outcome> {
    tracing::debug!("Dispatching {:?}", operation);
    Ok(match operation {
        Operation::Start => Outcome::Start(controller.start().await?),
        Operation::Stop => Outcome::Stop(controller.stop().await?),
        Operation::Status => Outcome::Status(controller.status().await?),
        Operation::Purge => Outcome::Purge(controller.purge().await?),
        Operation::Restart => Outcome::Restart(controller.restart().await?),
    })
}
