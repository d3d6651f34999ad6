// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake repository adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{RepoAdapter, RepoError};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded repo call
#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    Clone {
        url: String,
        git_ref: String,
        dest: PathBuf,
    },
    ResolveHead {
        checkout: PathBuf,
    },
    LastModified {
        checkout: PathBuf,
    },
}

#[derive(Default)]
struct FakeRepoState {
    /// Files (relative path, contents) materialized on clone
    files: Vec<(String, String)>,
    head: Option<String>,
    last_modified: String,
    clone_error: Option<String>,
}

/// Fake repository adapter for testing
///
/// Cloning creates the destination and writes the configured files into it.
#[derive(Clone, Default)]
pub struct FakeRepoAdapter {
    state: Arc<Mutex<FakeRepoState>>,
    calls: Arc<Mutex<Vec<RepoCall>>>,
}

impl FakeRepoAdapter {
    pub fn new() -> Self {
        let adapter = Self::default();
        {
            let mut state = adapter.state.lock().unwrap_or_else(|e| e.into_inner());
            state.head = Some("0123456789abcdef0123456789abcdef01234567".to_string());
            state.last_modified = "2020-07-01T14:23:17+02:00".to_string();
        }
        adapter
    }

    /// Add a file to every checkout
    pub fn with_file(self, rel_path: &str, contents: &str) -> Self {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .files
            .push((rel_path.to_string(), contents.to_string()));
        self
    }

    /// Set the resolved commit; `None` makes resolution fail
    pub fn set_head(&self, head: Option<&str>) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).head = head.map(str::to_string);
    }

    /// Make the next clones fail
    pub fn fail_clone(&self, reason: &str) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone_error = Some(reason.to_string());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: RepoCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl RepoAdapter for FakeRepoAdapter {
    async fn clone_at(
        &self,
        url: &str,
        git_ref: &str,
        dest: &Path,
        progress: &LogTee,
    ) -> Result<(), RepoError> {
        self.record(RepoCall::Clone {
            url: url.to_string(),
            git_ref: git_ref.to_string(),
            dest: dest.to_path_buf(),
        });

        let (files, clone_error) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (state.files.clone(), state.clone_error.clone())
        };

        if let Some(reason) = clone_error {
            return Err(RepoError::CloneFailed {
                url: url.to_string(),
                reason,
            });
        }

        let _ = progress
            .write_str(&format!("Cloning into '{}'...\n", dest.display()))
            .await;

        for (rel, contents) in files {
            let path = dest.join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| RepoError::CommandFailed(e.to_string()))?;
            }
            std::fs::write(&path, contents).map_err(|e| RepoError::CommandFailed(e.to_string()))?;
        }
        std::fs::create_dir_all(dest).map_err(|e| RepoError::CommandFailed(e.to_string()))?;

        Ok(())
    }

    async fn resolve_head(&self, checkout: &Path) -> Result<String, RepoError> {
        self.record(RepoCall::ResolveHead {
            checkout: checkout.to_path_buf(),
        });
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .head
            .clone()
            .ok_or_else(|| RepoError::CommandFailed("fatal: bad revision 'HEAD'".to_string()))
    }

    async fn last_modified(&self, checkout: &Path) -> Result<String, RepoError> {
        self.record(RepoCall::LastModified {
            checkout: checkout.to_path_buf(),
        });
        Ok(self
            .state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last_modified
            .clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
