//! # Bwrs Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Everything that talks to the Docker daemon, organised by concern:
//!
//! - **`connect`**: Builds the `bollard::Docker` client from local defaults.
//! - **`engine`**: The `ContainerEngine` trait the lifecycle operations are
//!   written against, its data types, and the bollard-backed `BollardEngine`.
//! - **`state`**: Listing containers by exact name.
//! - **`images`**: Pulling an image and resolving its id.
//! - **`lifecycle`**: Starting, stopping and removing existing containers.
//! - **`operations`**: Creating and starting a new container from a `RunSpec`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::docker::{self, BollardEngine, ContainerEngine};
//!
//! let engine = BollardEngine::new(docker::connect::connect_docker().await?);
//! let running = engine.list_containers("bitwarden_rs", false).await?;
//! ```
//!
pub mod connect;
pub mod engine;
pub mod images;
pub mod lifecycle;
pub mod operations;
pub mod state;

#[cfg(test)]
pub mod fake;

pub use engine::{BindMount, BollardEngine, ContainerEngine, ContainerRef, PortMapping, RunSpec};
