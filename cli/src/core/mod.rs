//! # Bwrs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces used by every operation:
//! - `config`: loading, expanding and validating the service configuration
//! - `error`: the `BwrsError` enum and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{BwrsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
