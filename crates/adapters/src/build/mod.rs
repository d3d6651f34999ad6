// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image build adapters

mod repo2docker;

pub use repo2docker::Repo2DockerAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{BuildCall, FakeBuildAdapter};

use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from image builds
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("cannot run {program}: {reason}")]
    Spawn { program: String, reason: String },
    #[error("build of {image} failed: {reason}")]
    Failed { image: String, reason: String },
    #[error("version query failed: {0}")]
    Version(String),
    #[error("checkout does not exist: {}", .0.display())]
    MissingCheckout(std::path::PathBuf),
}

impl BuildError {
    /// The tool ran and reported failure; its own output explains why
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, BuildError::Failed { .. })
    }
}

/// Adapter for the external repository-to-image build tool
#[async_trait]
pub trait BuildAdapter: Clone + Send + Sync + 'static {
    /// Version string of the build tool
    async fn version(&self) -> Result<String, BuildError>;

    /// Build `checkout` into an image tagged `image_id`, streaming output to `log`
    async fn build(&self, checkout: &Path, image_id: &str, log: &LogTee) -> Result<(), BuildError>;
}
