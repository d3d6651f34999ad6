// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime adapters

mod docker;

pub use docker::DockerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ContainerCall, FakeContainer, FakeContainerAdapter};

use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from container operations
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container failed to start: {0}")]
    StartFailed(String),
    #[error("invalid exit status from {id}: {output}")]
    InvalidStatus { id: String, output: String },
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// A host directory bound into a container
#[derive(Debug, Clone, PartialEq)]
pub struct Mount {
    pub host: PathBuf,
    pub target: String,
    pub read_only: bool,
}

impl Mount {
    pub fn read_only(host: impl Into<PathBuf>, target: &str) -> Self {
        Self {
            host: host.into(),
            target: target.to_string(),
            read_only: true,
        }
    }

    pub fn read_write(host: impl Into<PathBuf>, target: &str) -> Self {
        Self {
            host: host.into(),
            target: target.to_string(),
            read_only: false,
        }
    }

    /// `host:target:mode` volume argument
    pub fn volume_arg(&self) -> String {
        let mode = if self.read_only { "ro" } else { "rw" };
        format!("{}:{}:{}", self.host.display(), self.target, mode)
    }
}

/// What to run in a one-shot container
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerSpec {
    pub image: String,
    pub mounts: Vec<Mount>,
    pub command: Vec<String>,
}

/// Adapter for the container runtime
#[async_trait]
pub trait ContainerAdapter: Clone + Send + Sync + 'static {
    /// Whether an image with this id exists locally
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError>;

    /// Start a detached container, returning its id
    async fn start(&self, spec: &ContainerSpec) -> Result<String, ContainerError>;

    /// Follow combined stdout/stderr of a container into `log` until it exits
    async fn stream_logs(&self, id: &str, log: &LogTee) -> Result<(), ContainerError>;

    /// Wait for a container to exit and return its status code
    async fn wait(&self, id: &str) -> Result<i64, ContainerError>;

    /// Force-remove a container
    async fn remove(&self, id: &str) -> Result<(), ContainerError>;
}
