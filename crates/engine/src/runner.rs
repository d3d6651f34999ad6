// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running tests in one-shot containers

use crate::checker::Checker;
use crate::error::CheckError;
use crate::layout::RepoLayout;
use r2dc_adapters::{BuildAdapter, ContainerAdapter, ContainerSpec, LogTee, Mount, RepoAdapter};
use r2dc_core::config::DEFAULT_DRIVER;
use r2dc_core::{find_notebooks, TestKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where the driver directory is mounted in the container
pub const DRIVER_MOUNT: &str = "/src";
/// Where the repository run directory is mounted in the container
pub const OUTPUT_MOUNT: &str = "/io";

/// Outcome of one test, ready to be recorded
#[derive(Debug, Clone, PartialEq)]
pub struct TestOutcome {
    pub kind: TestKind,
    pub test_id: String,
    pub success: bool,
    pub log_path: PathBuf,
}

impl<R, B, C> Checker<'_, R, B, C>
where
    R: RepoAdapter,
    B: BuildAdapter,
    C: ContainerAdapter,
{
    /// Discover the notebooks in a checkout and run each one.
    ///
    /// The notebook limit applies after discovery, keeping a stable
    /// (sorted) prefix. A failure to launch or stream one notebook becomes
    /// a failed outcome and the remaining notebooks still run.
    pub async fn run_tests(
        &self,
        image: &str,
        checkout: &Path,
        layout: &RepoLayout,
    ) -> Result<Vec<TestOutcome>, CheckError> {
        let mut notebooks: Vec<String> = find_notebooks(checkout)
            .map(|path| path.to_string_lossy().into_owned())
            .collect();
        notebooks.sort();

        let count = notebooks.len();
        tracing::info!(count, "found notebooks to test");
        let limit = self.config.notebook_limit;
        if limit > 0 && count > limit {
            tracing::info!("limiting to first {}/{} notebooks", limit, count);
            notebooks.truncate(limit);
        }

        let mut outcomes = Vec::with_capacity(notebooks.len());
        let mut taken = HashSet::new();
        for notebook in notebooks {
            let log_path = layout.unique_test_log(TestKind::Notebook, &notebook, &taken);
            taken.insert(log_path.clone());
            let success = match self
                .run_one(image, TestKind::Notebook, &notebook, &layout.repo_dir, &log_path)
                .await
            {
                Ok(status) => status == 0,
                Err(e) if e.is_infrastructure() => return Err(e),
                Err(e) => {
                    tracing::error!(notebook, error = %e, "error running test");
                    false
                }
            };
            outcomes.push(TestOutcome {
                kind: TestKind::Notebook,
                test_id: notebook,
                success,
                log_path,
            });
        }
        Ok(outcomes)
    }

    /// Run one test in a fresh container and return its exit status.
    ///
    /// The container is removed on every path once it has started, and the
    /// log is flushed before returning.
    pub async fn run_one(
        &self,
        image: &str,
        kind: TestKind,
        argument: &str,
        repo_dir: &Path,
        log_path: &Path,
    ) -> Result<i64, CheckError> {
        let spec = self.container_spec(image, kind, argument, repo_dir)?;
        let log = LogTee::create(log_path, !self.config.quiet).map_err(CheckError::io(log_path))?;

        let ran = self.run_in_container(&spec, &log, log_path).await;
        if let Err(e) = &ran {
            // keep the reason next to whatever output made it into the log
            if let Err(write_err) = log.write_str(&format!("\n{}\n", e)).await {
                tracing::debug!(error = %write_err, "could not append error to test log");
            }
        }
        let flushed = log.finish().await.map_err(CheckError::io(log_path));
        let status = ran?;
        flushed?;
        Ok(status)
    }

    async fn run_in_container(
        &self,
        spec: &ContainerSpec,
        log: &LogTee,
        log_path: &Path,
    ) -> Result<i64, CheckError> {
        let id = self.containers.start(spec).await?;

        let ran: Result<i64, CheckError> = async {
            self.containers.stream_logs(&id, log).await?;
            let status = self.containers.wait(&id).await?;
            log.write_str(&format!("\nContainer exited with status: {}\n", status))
                .await
                .map_err(CheckError::io(log_path))?;
            Ok(status)
        }
        .await;

        if let Err(e) = self.containers.remove(&id).await {
            tracing::warn!(id, error = %e, "failed to remove container");
        }
        ran
    }

    fn container_spec(
        &self,
        image: &str,
        kind: TestKind,
        argument: &str,
        repo_dir: &Path,
    ) -> Result<ContainerSpec, CheckError> {
        let driver = &self.config.driver_path;
        let driver_dir = driver
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let driver_name = driver
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DRIVER.to_string());

        // the container runtime needs absolute host paths
        let driver_dir = std::path::absolute(driver_dir).map_err(CheckError::io(driver_dir))?;
        let repo_dir = std::path::absolute(repo_dir).map_err(CheckError::io(repo_dir))?;

        Ok(ContainerSpec {
            image: image.to_string(),
            mounts: vec![
                Mount::read_only(driver_dir, DRIVER_MOUNT),
                Mount::read_write(repo_dir, OUTPUT_MOUNT),
            ],
            command: vec![
                format!("{}/{}", DRIVER_MOUNT, driver_name),
                "--output-dir".to_string(),
                OUTPUT_MOUNT.to_string(),
                "--timeout".to_string(),
                self.config.notebook_timeout_secs.to_string(),
                kind.to_string(),
                argument.to_string(),
            ],
        })
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
