//! In-memory `ContainerEngine` for unit tests.
//!
//! Keeps a list of containers with a running flag, applies each call to it,
//! and records every call so tests can assert on exactly what was asked of
//! the engine.

use crate::core::error::{BwrsError, Result};
use anyhow::anyhow;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::engine::{ContainerEngine, ContainerRef, RunSpec};

pub const FAKE_IMAGE_ID: &str =
    "sha256:9a1f0c3d5e7b2a4c6e8f0a1b3c5d7e9f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List { name: String, all: bool },
    Pull(String),
    ImageId(String),
    Run(RunSpec),
    Start(String),
    Stop { id: String, timeout_secs: Option<u32> },
    Remove(String),
}

#[derive(Debug, Clone)]
struct FakeContainer {
    container: ContainerRef,
    running: bool,
}

#[derive(Default)]
struct Inner {
    containers: Vec<FakeContainer>,
    calls: Vec<Call>,
    next_id: u32,
}

/// Recording fake. Clones share state.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a pre-existing container.
    pub fn with_container(self, name: &str, running: bool) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            let container = ContainerRef::new(fresh_id(&mut inner), name);
            inner.containers.push(FakeContainer { container, running });
        }
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn runs(&self) -> Vec<RunSpec> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Run(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// True if any call other than listing reached the engine.
    pub fn mutated(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| !matches!(c, Call::List { .. }))
    }

    pub fn containers(&self) -> Vec<(ContainerRef, bool)> {
        self.inner
            .lock()
            .unwrap()
            .containers
            .iter()
            .map(|c| (c.container.clone(), c.running))
            .collect()
    }

    fn record(&self, call: Call) {
        self.inner.lock().unwrap().calls.push(call);
    }
}

fn fresh_id(inner: &mut Inner) -> String {
    inner.next_id += 1;
    format!("{:064x}", 0xc0ffee_u64 * 1000 + u64::from(inner.next_id))
}

#[async_trait]
impl ContainerEngine for RecordingEngine {
    async fn list_containers(&self, name: &str, all: bool) -> Result<Vec<ContainerRef>> {
        self.record(Call::List {
            name: name.to_string(),
            all,
        });
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .containers
            .iter()
            .filter(|c| c.container.name == name && (all || c.running))
            .map(|c| c.container.clone())
            .collect())
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        self.record(Call::Pull(reference.to_string()));
        Ok(())
    }

    async fn image_id(&self, reference: &str) -> Result<String> {
        self.record(Call::ImageId(reference.to_string()));
        Ok(FAKE_IMAGE_ID.to_string())
    }

    async fn run_container(&self, spec: &RunSpec) -> Result<ContainerRef> {
        self.record(Call::Run(spec.clone()));
        let mut inner = self.inner.lock().unwrap();
        let container = ContainerRef::new(fresh_id(&mut inner), spec.name.as_str());
        inner.containers.push(FakeContainer {
            container: container.clone(),
            running: true,
        });
        Ok(container)
    }

    async fn start_container(&self, id: &str) -> Result<()> {
        self.record(Call::Start(id.to_string()));
        set_running(&self.inner, id, true)
    }

    async fn stop_container(&self, id: &str, timeout_secs: Option<u32>) -> Result<()> {
        self.record(Call::Stop {
            id: id.to_string(),
            timeout_secs,
        });
        set_running(&self.inner, id, false)
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        self.record(Call::Remove(id.to_string()));
        let mut inner = self.inner.lock().unwrap();
        let before = inner.containers.len();
        inner.containers.retain(|c| c.container.id != id);
        if inner.containers.len() == before {
            return Err(anyhow!(BwrsError::NotFound {
                name: id.to_string()
            }));
        }
        Ok(())
    }
}

fn set_running(inner: &Arc<Mutex<Inner>>, id: &str, running: bool) -> Result<()> {
    let mut inner = inner.lock().unwrap();
    match inner.containers.iter_mut().find(|c| c.container.id == id) {
        Some(c) => {
            c.running = running;
            Ok(())
        }
        None => Err(anyhow!(BwrsError::NotFound {
            name: id.to_string()
        })),
    }
}
