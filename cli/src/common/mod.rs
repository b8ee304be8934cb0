//! # Bwrs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared infrastructure used by the lifecycle operations in `commands::`.
//! Currently this is the Docker layer only: the `ContainerEngine` seam and
//! its `bollard`-backed implementation.
//!

/// Interaction with the Docker daemon via the `bollard` crate.
pub mod docker;
