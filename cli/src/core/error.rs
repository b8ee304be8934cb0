//! # Bwrs Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! Error types shared by the lifecycle operations and the Docker layer.
//!
//! ## Architecture
//!
//! - `BwrsError`: a `thiserror` enum carrying the lifecycle error kinds
//!   (already running, not found, duplicate names, bad configuration) plus
//!   wrappers for Docker Engine failures.
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so call sites can add
//!   context while callers can still `downcast_ref::<BwrsError>()` to react
//!   to a specific kind.
//!
//! ## Examples
//!
//! ```rust
//! match controller.stop().await {
//!     Err(e) if is_not_found(&e) => { /* fall back to a wider lookup */ }
//!     other => other?,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for bwrs.
#[derive(Error, Debug)]
pub enum BwrsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Container '{name}' is already running.")]
    AlreadyRunning { name: String },

    #[error("Container '{name}' not found.")]
    NotFound { name: String },

    #[error("Multiple containers named '{name}' found ({count}).")]
    MultipleContainersWithSameName { name: String, count: usize },

    #[error("Docker API interaction failed: {source}")]
    DockerApi {
        #[from]
        source: bollard::errors::Error,
    },

    #[error("Docker operation failed: {0}")]
    DockerOperation(String),
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;

/// True when `err` (or anything it wraps) is a `BwrsError::NotFound`.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<BwrsError>()
            .is_some_and(|e| matches!(e, BwrsError::NotFound { .. }))
    })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_error_display() {
        let config_err = BwrsError::Config("data_dir must end with '/'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: data_dir must end with '/'"
        );

        let running = BwrsError::AlreadyRunning {
            name: "bitwarden_rs".into(),
        };
        assert_eq!(
            running.to_string(),
            "Container 'bitwarden_rs' is already running."
        );

        let dupes = BwrsError::MultipleContainersWithSameName {
            name: "bitwarden_rs".into(),
            count: 2,
        };
        assert_eq!(
            dupes.to_string(),
            "Multiple containers named 'bitwarden_rs' found (2)."
        );
    }

    #[test]
    fn test_is_not_found_through_context() {
        let err = Err::<(), _>(anyhow!(BwrsError::NotFound {
            name: "bitwarden_rs".into()
        }))
        .context("stopping before purge")
        .unwrap_err();
        assert!(is_not_found(&err));

        let other = anyhow!(BwrsError::AlreadyRunning {
            name: "bitwarden_rs".into()
        });
        assert!(!is_not_found(&other));
    }
}
