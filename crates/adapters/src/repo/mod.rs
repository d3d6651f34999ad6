// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository fetch adapters

mod git;

pub use git::GitAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRepoAdapter, RepoCall};

use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors from repo operations
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("clone of {url} failed: {reason}")]
    CloneFailed { url: String, reason: String },
    #[error("ref not found: {0}")]
    RefNotFound(String),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

/// Adapter for fetching a repository snapshot
#[async_trait]
pub trait RepoAdapter: Clone + Send + Sync + 'static {
    /// Clone `url` into `dest` and check out `git_ref`, streaming progress
    async fn clone_at(
        &self,
        url: &str,
        git_ref: &str,
        dest: &Path,
        progress: &LogTee,
    ) -> Result<(), RepoError>;

    /// Commit hash currently checked out
    async fn resolve_head(&self, checkout: &Path) -> Result<String, RepoError>;

    /// Commit date of HEAD, strict ISO-8601 with offset
    async fn last_modified(&self, checkout: &Path) -> Result<String, RepoError>;
}
