//! # Bwrs Docker State Querying
//!
//! File: cli/src/common/docker/state.rs
//!
//! ## Overview
//!
//! Read-only queries against the Docker daemon. The only question the
//! lifecycle operations ever ask is "which containers carry exactly this
//! name?", optionally including stopped ones.
//!
//! ## Architecture
//!
//! Docker's `name` filter is an unanchored regular expression, so a plain
//! `name=bitwarden_rs` filter also returns `bitwarden_rs_old`. The query is
//! therefore anchored as `^/<name>$` and the summaries are checked again
//! client-side before being converted to `ContainerRef`s.
//!
use crate::core::error::{BwrsError, Result};
use anyhow::anyhow;
use bollard::{container::ListContainersOptions, models::ContainerSummary, Docker};
use std::collections::HashMap;
use tracing::{debug, error, instrument, warn};

use super::engine::ContainerRef;

/// Lists containers whose name is exactly `name`.
///
/// # Arguments
///
/// * `docker` - Connected client.
/// * `name` - Container name without the leading `/`.
/// * `all` - If `true`, includes stopped and exited containers; otherwise only running ones.
///
/// # Errors
///
/// Returns `BwrsError::DockerApi` wrapped in `anyhow::Error` if the Docker API call fails.
#[instrument(skip(docker))]
pub async fn list_named_containers(
    docker: &Docker,
    name: &str,
    all: bool,
) -> Result<Vec<ContainerRef>> {
    // `all: false` restricts the listing to running containers.
    let options = Some(ListContainersOptions::<String> {
        all,
        filters: name_filter(name),
        ..Default::default()
    });

    let summaries = docker.list_containers(options).await.map_err(|e| {
        error!("Failed to list containers named '{}': {:?}", name, e);
        anyhow!(BwrsError::DockerApi { source: e })
    })?;

    // The daemon filter is a regex; re-check names before trusting it.
    let matches = exact_matches(summaries, name);
    debug!("{} container(s) named '{}' (all: {})", matches.len(), name, all);
    Ok(matches)
}

fn name_filter(name: &str) -> HashMap<String, Vec<String>> {
    HashMap::from([("name".to_string(), vec![format!("^/{}$", name)])])
}

/// Keeps only summaries that carry exactly `/<name>` among their names.
fn exact_matches(summaries: Vec<ContainerSummary>, name: &str) -> Vec<ContainerRef> {
    let wanted = format!("/{}", name);
    summaries
        .into_iter()
        .filter_map(|summary| {
            let names = summary.names.unwrap_or_default();
            if !names.iter().any(|n| *n == wanted) {
                return None;
            }
            match summary.id {
                Some(id) => Some(ContainerRef::new(id, wanted.as_str())),
                None => {
                    warn!("Skipping container named '{}' with no id", name);
                    None
                }
            }
        })
        .collect()
}
