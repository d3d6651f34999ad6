// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake container adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ContainerAdapter, ContainerError, ContainerSpec};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Recorded container call
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerCall {
    ImageExists { image: String },
    Start { spec: ContainerSpec },
    StreamLogs { id: String },
    Wait { id: String },
    Remove { id: String },
}

/// Fake container state
#[derive(Debug, Clone)]
pub struct FakeContainer {
    pub spec: ContainerSpec,
    pub removed: bool,
}

/// Scripted behaviour for containers whose command ends with a given argument
#[derive(Debug, Clone, Default)]
struct Script {
    output: Vec<u8>,
    exit_code: i64,
    fail_start: bool,
    fail_logs: bool,
}

#[derive(Default)]
struct FakeContainerState {
    images: HashSet<String>,
    scripts: HashMap<String, Script>,
    containers: HashMap<String, FakeContainer>,
    next_id: u64,
}

/// Fake container adapter for testing
///
/// Containers print their scripted output and exit with the scripted code;
/// unscripted containers print nothing and exit 0.
#[derive(Clone, Default)]
pub struct FakeContainerAdapter {
    state: Arc<Mutex<FakeContainerState>>,
    calls: Arc<Mutex<Vec<ContainerCall>>>,
}

impl FakeContainerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend an image already exists
    pub fn add_image(&self, image: &str) {
        self.lock().images.insert(image.to_string());
    }

    /// Script the container run for `argument`
    pub fn script(&self, argument: &str, output: &[u8], exit_code: i64) {
        let mut state = self.lock();
        let script = state.scripts.entry(argument.to_string()).or_default();
        script.output = output.to_vec();
        script.exit_code = exit_code;
    }

    /// Make starting a container for `argument` fail
    pub fn fail_start(&self, argument: &str) {
        self.lock()
            .scripts
            .entry(argument.to_string())
            .or_default()
            .fail_start = true;
    }

    /// Make streaming logs for `argument` fail
    pub fn fail_logs(&self, argument: &str) {
        self.lock()
            .scripts
            .entry(argument.to_string())
            .or_default()
            .fail_logs = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ContainerCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Every container started so far
    pub fn containers(&self) -> Vec<FakeContainer> {
        self.lock().containers.values().cloned().collect()
    }

    /// Containers started but never removed
    pub fn live_containers(&self) -> Vec<FakeContainer> {
        self.containers().into_iter().filter(|c| !c.removed).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeContainerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: ContainerCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn script_for(&self, id: &str) -> Result<Script, ContainerError> {
        let state = self.lock();
        let container = state
            .containers
            .get(id)
            .ok_or_else(|| ContainerError::CommandFailed(format!("No such container: {}", id)))?;
        let argument = container.spec.command.last().cloned().unwrap_or_default();
        Ok(state.scripts.get(&argument).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl ContainerAdapter for FakeContainerAdapter {
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        self.record(ContainerCall::ImageExists {
            image: image.to_string(),
        });
        Ok(self.lock().images.contains(image))
    }

    async fn start(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        self.record(ContainerCall::Start { spec: spec.clone() });

        let mut state = self.lock();
        let argument = spec.command.last().cloned().unwrap_or_default();
        if state.scripts.get(&argument).is_some_and(|s| s.fail_start) {
            return Err(ContainerError::StartFailed(format!(
                "Unable to find image '{}' locally",
                spec.image
            )));
        }

        state.next_id += 1;
        let id = format!("fake-container-{}", state.next_id);
        state.containers.insert(
            id.clone(),
            FakeContainer {
                spec: spec.clone(),
                removed: false,
            },
        );
        Ok(id)
    }

    async fn stream_logs(&self, id: &str, log: &LogTee) -> Result<(), ContainerError> {
        self.record(ContainerCall::StreamLogs { id: id.to_string() });

        let script = self.script_for(id)?;
        if script.fail_logs {
            return Err(ContainerError::CommandFailed(format!(
                "error from daemon in stream for {}",
                id
            )));
        }
        log.write(&script.output)
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        self.record(ContainerCall::Wait { id: id.to_string() });
        Ok(self.script_for(id)?.exit_code)
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        self.record(ContainerCall::Remove { id: id.to_string() });

        let mut state = self.lock();
        match state.containers.get_mut(id) {
            Some(container) => {
                container.removed = true;
                Ok(())
            }
            None => Err(ContainerError::CommandFailed(format!(
                "No such container: {}",
                id
            ))),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
