//! # Bwrs Lifecycle Controller
//!
//! File: cli/src/commands/controller.rs
//!
//! ## Overview
//!
//! `LifecycleController` pairs a `ContainerEngine` with the loaded `Config`.
//! The five operations live in their own modules (`start`, `stop`, `status`,
//! `purge`, `restart`) as `impl` blocks on this type; this file holds the
//! struct and the helpers they share.
//!
//! The controller keeps no container state of its own. Every operation asks
//! the engine again, so the daemon is always the source of truth.
//!
use crate::common::docker::{ContainerEngine, ContainerRef};
use crate::core::{
    config::Config,
    error::{BwrsError, Result},
};
use anyhow::anyhow;

/// Manages the configured container through a container engine.
pub struct LifecycleController<E> {
    pub(super) engine: E,
    pub(super) config: Config,
}

impl<E: ContainerEngine> LifecycleController<E> {
    pub fn new(engine: E, config: Config) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(super) fn container_name(&self) -> &str {
        &self.config.service.container_name
    }

    /// Narrows a name lookup to the one container operations act on.
    ///
    /// No match is `NotFound`; more than one is `MultipleContainersWithSameName`.
    pub(super) fn single_match(&self, mut matches: Vec<ContainerRef>) -> Result<ContainerRef> {
        match matches.len() {
            0 => Err(anyhow!(BwrsError::NotFound {
                name: self.container_name().to_string()
            })),
            1 => Ok(matches.remove(0)),
            count => Err(anyhow!(BwrsError::MultipleContainersWithSameName {
                name: self.container_name().to_string(),
                count,
            })),
        }
    }
}
