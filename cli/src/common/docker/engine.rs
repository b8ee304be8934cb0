//! # Bwrs Container Engine Seam
//!
//! File: cli/src/common/docker/engine.rs
//!
//! ## Overview
//!
//! Defines the `ContainerEngine` trait: the handful of Docker Engine calls the
//! lifecycle operations need. The production implementation, `BollardEngine`,
//! delegates to the `state`, `images`, `lifecycle` and `operations` modules;
//! unit tests substitute a recording fake.
//!
//! Also defines the plain data types that cross the seam (`ContainerRef`,
//! `RunSpec`, `BindMount`, `PortMapping`), so callers never touch `bollard`
//! models directly.
//!
use crate::core::error::Result;
use async_trait::async_trait;
use bollard::Docker;
use std::fmt;

use super::{images, lifecycle, operations, state};

/// Length of the short container id, as `docker ps` prints it.
pub const SHORT_ID_LEN: usize = 12;

/// A container as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    /// Full 64-character container id.
    pub id: String,
    /// First `SHORT_ID_LEN` characters of `id`.
    pub short_id: String,
    /// Container name without the engine's leading `/`.
    pub name: String,
}

impl ContainerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let short_id = id.chars().take(SHORT_ID_LEN).collect();
        let name = name.into();
        Self {
            id,
            short_id,
            name: name.trim_start_matches('/').to_string(),
        }
    }
}

/// A host directory mounted into the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    pub host: String,
    pub container: String,
    pub read_only: bool,
}

impl fmt::Display for BindMount {
    /// Docker's `binds` syntax: `HOST:CONTAINER:rw|ro`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.read_only { "ro" } else { "rw" };
        write!(f, "{}:{}:{}", self.host, self.container, mode)
    }
}

/// A container port published on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub container_port: u16,
    pub protocol: String,
    pub host_port: u16,
}

impl PortMapping {
    pub fn tcp(container_port: u16, host_port: u16) -> Self {
        Self {
            container_port,
            protocol: "tcp".to_string(),
            host_port,
        }
    }

    /// Key used by the Docker API for exposed ports and bindings, e.g. `80/tcp`.
    pub fn container_key(&self) -> String {
        format!("{}/{}", self.container_port, self.protocol)
    }
}

/// Everything needed to create and start a new container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub image: String,
    pub name: String,
    /// `KEY=VALUE` entries.
    pub env: Vec<String>,
    pub binds: Vec<BindMount>,
    pub ports: Vec<PortMapping>,
    pub detach: bool,
}

/// Container engine operations used by the lifecycle controller.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Containers whose name is exactly `name`; stopped ones only when `all`.
    async fn list_containers(&self, name: &str, all: bool) -> Result<Vec<ContainerRef>>;

    /// Pulls `reference` from its registry into the local image store.
    async fn pull_image(&self, reference: &str) -> Result<()>;

    /// Full id (`sha256:...`) of the local image `reference`.
    async fn image_id(&self, reference: &str) -> Result<String>;

    /// Creates and starts a container from `spec`.
    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerRef>;

    async fn start_container(&self, id: &str) -> Result<()>;

    /// Stops a running container; `timeout_secs` of `None` keeps the engine default.
    async fn stop_container(&self, id: &str, timeout_secs: Option<u32>) -> Result<()>;

    async fn remove_container(&self, id: &str) -> Result<()>;
}

/// `ContainerEngine` backed by the local Docker daemon.
#[derive(Clone)]
pub struct BollardEngine {
    docker: Docker,
}

impl BollardEngine {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }
}

#[async_trait]
impl ContainerEngine for BollardEngine {
    async fn list_containers(&self, name: &str, all: bool) -> Result<Vec<ContainerRef>> {
        state::list_named_containers(&self.docker, name, all).await
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        images::pull_image(&self.docker, reference).await
    }

    async fn image_id(&self, reference: &str) -> Result<String> {
        images::image_id(&self.docker, reference).await
    }

    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerRef> {
        operations::run_container(&self.docker, spec).await
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        lifecycle::start_container(&self.docker, id).await
    }

    async fn stop_container(&self, id: &str, timeout_secs: Option<u32>) -> Result<()> {
        lifecycle::stop_container(&self.docker, id, timeout_secs).await
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        lifecycle::remove_container(&self.docker, id).await
    }
}
