// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! repo2docker build adapter

use super::{BuildAdapter, BuildError};
use crate::process::{describe, run_teed};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Builds images with `jupyter-repo2docker`
#[derive(Clone)]
pub struct Repo2DockerAdapter {
    program: String,
}

impl Repo2DockerAdapter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Repo2DockerAdapter {
    fn default() -> Self {
        Self::new("jupyter-repo2docker")
    }
}

#[async_trait]
impl BuildAdapter for Repo2DockerAdapter {
    async fn version(&self) -> Result<String, BuildError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .map_err(|e| BuildError::Spawn {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(BuildError::Version(describe(&output.status)));
        }

        // older releases print the version on stderr
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !stdout.is_empty() {
            return Ok(stdout);
        }
        Ok(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }

    async fn build(&self, checkout: &Path, image_id: &str, log: &LogTee) -> Result<(), BuildError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--no-run")
            .arg("--no-clean")
            .arg("--image-name")
            .arg(image_id)
            .arg(checkout);

        let status = run_teed(cmd, log).await.map_err(|e| BuildError::Spawn {
            program: self.program.clone(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            return Err(BuildError::Failed {
                image: image_id.to_string(),
                reason: describe(&status),
            });
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
#[path = "repo2docker_tests.rs"]
mod tests;
