//! # Bwrs Docker Image Operations
//!
//! File: cli/src/common/docker/images.rs
//!
//! ## Overview
//!
//! Image handling for `start`: pulling the configured reference from its
//! registry and resolving the id of the local copy afterwards.
//!
//! ## Architecture
//!
//! - **`pull_image`**: Splits the reference into repository and tag and drains
//!   the `create_image` progress stream, failing on the first error event.
//! - **`image_id`**: Wraps `inspect_image`, mapping 404 to a clear error.
//! - **`split_image_reference`** / **`image_short_id`**: pure helpers.
//!
//! The Docker API treats an empty `tag` as "every tag", so the tag is always
//! sent explicitly (defaulting to `latest`).
//!
use crate::core::error::{BwrsError, Result};
use anyhow::{anyhow, Context};
use bollard::{image::CreateImageOptions, Docker};
use futures_util::stream::StreamExt;
use tracing::{debug, error, info, instrument, trace};

const DEFAULT_TAG: &str = "latest";
const DIGEST_PREFIX: &str = "sha256:";
const SHORT_IMAGE_ID_LEN: usize = 10;

/// Pulls `reference` from its registry into the local image store.
///
/// # Errors
///
/// * `BwrsError::DockerOperation` - If the daemon reports an error event in the pull stream.
/// * `BwrsError::DockerApi` - If the stream itself fails (registry unreachable, auth, etc.).
#[instrument(skip(docker))]
pub async fn pull_image(docker: &Docker, reference: &str) -> Result<()> {
    let (repository, tag) = split_image_reference(reference);
    info!("Pulling image {}:{}", repository, tag);

    let options = CreateImageOptions {
        from_image: repository.to_string(),
        tag: tag.to_string(),
        ..Default::default()
    };
    let mut stream = Box::pin(docker.create_image(Some(options), None, None));

    while let Some(event) = stream.next().await {
        match event {
            Ok(info) => {
                if let Some(message) = info.error {
                    error!("Pull of '{}' reported an error: {}", reference, message);
                    return Err(anyhow!(BwrsError::DockerOperation(format!(
                        "Failed to pull image '{}': {}",
                        reference, message
                    ))));
                }
                match (info.status, info.progress) {
                    (Some(status), Some(progress)) => trace!("{}: {}", status, progress),
                    (Some(status), None) => debug!("Pull status: {}", status),
                    _ => {}
                }
            }
            Err(e) => {
                return Err(anyhow!(BwrsError::DockerApi { source: e }))
                    .with_context(|| format!("Failed to pull image '{}'", reference));
            }
        }
    }

    info!("Image '{}' is up to date", reference);
    Ok(())
}

/// Returns the full id (`sha256:...`) of the local image `reference`.
///
/// # Errors
///
/// * `BwrsError::DockerOperation` - If the image is not present locally (Docker 404).
/// * `BwrsError::DockerApi` - For other errors during communication with the Docker daemon.
#[instrument(skip(docker))]
pub async fn image_id(docker: &Docker, reference: &str) -> Result<String> {
    let details = docker.inspect_image(reference).await.map_err(|e| match e {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404, ..
        } => anyhow!(BwrsError::DockerOperation(format!(
            "Image '{}' not found locally",
            reference
        ))),
        _ => anyhow!(BwrsError::DockerApi { source: e })
            .context(format!("Failed to inspect image '{}'", reference)),
    })?;

    details.id.ok_or_else(|| {
        anyhow!(BwrsError::DockerOperation(format!(
            "Docker returned no id for image '{}'",
            reference
        )))
    })
}

/// Splits an image reference into `(repository, tag)`.
///
/// The tag defaults to `latest`. A colon that belongs to a registry host
/// (`localhost:5000/app`) is not a tag separator. Digest references keep the
/// digest in the repository part and get an empty tag.
pub fn split_image_reference(reference: &str) -> (&str, &str) {
    if reference.contains('@') {
        return (reference, "");
    }
    let last_segment_start = reference.rfind('/').map_or(0, |i| i + 1);
    match reference[last_segment_start..].rfind(':') {
        Some(offset) => {
            let colon = last_segment_start + offset;
            (&reference[..colon], &reference[colon + 1..])
        }
        None => (reference, DEFAULT_TAG),
    }
}

/// Short form of an image id as operators know it: `sha256:` plus 10 hex digits.
pub fn image_short_id(id: &str) -> String {
    let digest = id.strip_prefix(DIGEST_PREFIX).unwrap_or(id);
    let short: String = digest.chars().take(SHORT_IMAGE_ID_LEN).collect();
    format!("{}{}", DIGEST_PREFIX, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_image_reference() {
        assert_eq!(
            split_image_reference("bitwardenrs/server:latest"),
            ("bitwardenrs/server", "latest")
        );
        assert_eq!(
            split_image_reference("bitwardenrs/server"),
            ("bitwardenrs/server", "latest")
        );
        assert_eq!(
            split_image_reference("localhost:5000/vault/server"),
            ("localhost:5000/vault/server", "latest")
        );
        assert_eq!(
            split_image_reference("localhost:5000/vault/server:1.30.0"),
            ("localhost:5000/vault/server", "1.30.0")
        );
        assert_eq!(
            split_image_reference("vaultwarden/server@sha256:abcd"),
            ("vaultwarden/server@sha256:abcd", "")
        );
    }

    #[test]
    fn test_image_short_id() {
        assert_eq!(
            image_short_id("sha256:0123456789abcdef0123456789abcdef"),
            "sha256:0123456789"
        );
        assert_eq!(image_short_id("0123456789abcdef"), "sha256:0123456789");
    }

    /// Requires a running Docker daemon and registry access.
    #[tokio::test]
    #[ignore]
    async fn test_pull_and_inspect_alpine() {
        let docker = Docker::connect_with_local_defaults().unwrap();
        pull_image(&docker, "alpine:latest").await.unwrap();
        let id = image_id(&docker, "alpine:latest").await.unwrap();
        assert!(id.starts_with("sha256:"));
    }
}
