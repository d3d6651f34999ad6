// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker CLI container adapter

use super::{ContainerAdapter, ContainerError, ContainerSpec};
use crate::process::{describe, run_teed};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::process::Output;
use tokio::process::Command;

/// Container adapter driving the `docker` CLI (or a compatible one)
#[derive(Clone)]
pub struct DockerAdapter {
    program: String,
}

impl DockerAdapter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for `docker run` in detached mode
    pub fn run_args(spec: &ContainerSpec) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--detach".to_string()];
        for mount in &spec.mounts {
            args.push("--volume".to_string());
            args.push(mount.volume_arg());
        }
        args.push(spec.image.clone());
        args.extend(spec.command.iter().cloned());
        args
    }

    async fn output(&self, args: &[&str]) -> Result<Output, ContainerError> {
        Command::new(&self.program)
            .args(args)
            .output()
            .await
            .map_err(|e| ContainerError::CommandFailed(format!("{}: {}", self.program, e)))
    }
}

impl Default for DockerAdapter {
    fn default() -> Self {
        Self::new("docker")
    }
}

#[async_trait]
impl ContainerAdapter for DockerAdapter {
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        let output = self
            .output(&["image", "inspect", "--format", "{{.Id}}", image])
            .await?;
        if output.status.success() {
            return Ok(true);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("no such image") {
            return Ok(false);
        }
        Err(ContainerError::CommandFailed(stderr.trim().to_string()))
    }

    async fn start(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let output = Command::new(&self.program)
            .args(Self::run_args(spec))
            .output()
            .await
            .map_err(|e| ContainerError::StartFailed(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::StartFailed(stderr.trim().to_string()));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(ContainerError::StartFailed("no container id returned".to_string()));
        }
        Ok(id)
    }

    async fn stream_logs(&self, id: &str, log: &LogTee) -> Result<(), ContainerError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("logs").arg("--follow").arg(id);

        let status = run_teed(cmd, log)
            .await
            .map_err(|e| ContainerError::CommandFailed(e.to_string()))?;
        if !status.success() {
            return Err(ContainerError::CommandFailed(format!(
                "logs for {}: {}",
                id,
                describe(&status)
            )));
        }
        Ok(())
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let output = self.output(&["wait", id]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        stdout
            .parse::<i64>()
            .map_err(|_| ContainerError::InvalidStatus {
                id: id.to_string(),
                output: stdout,
            })
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        let output = self.output(&["rm", "--force", id]).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::CommandFailed(stderr.trim().to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Mount;

    #[test]
    fn run_args_mount_driver_and_io() {
        let spec = ContainerSpec {
            image: "r2d-test-github.com-org-repo:abc".to_string(),
            mounts: vec![
                Mount::read_only("/opt/r2dc/bin", "/src"),
                Mount::read_write("/runs/github.com/o/org/repo", "/io"),
            ],
            command: vec![
                "/src/r2dc-inrepo".to_string(),
                "notebook".to_string(),
                "index.ipynb".to_string(),
            ],
        };

        assert_eq!(
            DockerAdapter::run_args(&spec),
            vec![
                "run",
                "--detach",
                "--volume",
                "/opt/r2dc/bin:/src:ro",
                "--volume",
                "/runs/github.com/o/org/repo:/io:rw",
                "r2d-test-github.com-org-repo:abc",
                "/src/r2dc-inrepo",
                "notebook",
                "index.ipynb",
            ]
        );
    }

    #[tokio::test]
    async fn missing_runtime_is_a_command_failure() {
        let adapter = DockerAdapter::new("/nonexistent/docker");
        assert!(matches!(
            adapter.image_exists("img:1").await,
            Err(ContainerError::CommandFailed(_))
        ));
    }
}
