// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Git repository adapter

use super::{RepoAdapter, RepoError};
use crate::process::{describe, run_teed};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

/// Git-based repository adapter
#[derive(Clone, Default)]
pub struct GitAdapter;

impl GitAdapter {
    pub fn new() -> Self {
        Self
    }

    async fn git_output(&self, checkout: &Path, args: &[&str]) -> Result<String, RepoError> {
        let output = Command::new("git")
            .current_dir(checkout)
            .args(args)
            .output()
            .await
            .map_err(|e| RepoError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RepoError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl RepoAdapter for GitAdapter {
    async fn clone_at(
        &self,
        url: &str,
        git_ref: &str,
        dest: &Path,
        progress: &LogTee,
    ) -> Result<(), RepoError> {
        let mut clone = Command::new("git");
        clone.arg("clone").arg("--recursive").arg(url).arg(dest);
        let status = run_teed(clone, progress)
            .await
            .map_err(|e| RepoError::CommandFailed(e.to_string()))?;
        if !status.success() {
            return Err(RepoError::CloneFailed {
                url: url.to_string(),
                reason: describe(&status),
            });
        }

        // checkout also resolves remote branch names and tags
        let mut checkout = Command::new("git");
        checkout
            .current_dir(dest)
            .arg("checkout")
            .arg("--quiet")
            .arg(git_ref)
            .arg("--");
        let status = run_teed(checkout, progress)
            .await
            .map_err(|e| RepoError::CommandFailed(e.to_string()))?;
        if !status.success() {
            return Err(RepoError::RefNotFound(git_ref.to_string()));
        }

        let mut submodules = Command::new("git");
        submodules
            .current_dir(dest)
            .args(["submodule", "update", "--init", "--recursive"]);
        let status = run_teed(submodules, progress)
            .await
            .map_err(|e| RepoError::CommandFailed(e.to_string()))?;
        if !status.success() {
            return Err(RepoError::CommandFailed(format!(
                "submodule update failed: {}",
                describe(&status)
            )));
        }

        Ok(())
    }

    async fn resolve_head(&self, checkout: &Path) -> Result<String, RepoError> {
        self.git_output(checkout, &["rev-parse", "HEAD"]).await
    }

    async fn last_modified(&self, checkout: &Path) -> Result<String, RepoError> {
        self.git_output(checkout, &["log", "-1", "--date=iso-strict", "--format=%ad"])
            .await
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
