// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake build adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{BuildAdapter, BuildError};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Recorded build call
#[derive(Debug, Clone, PartialEq)]
pub enum BuildCall {
    Version,
    Build { checkout: PathBuf, image_id: String },
}

#[derive(Default)]
struct FakeBuildState {
    /// Output written to the build log on every build
    output: String,
    failure: Option<String>,
    spawn_failure: bool,
}

/// Fake build adapter for testing
#[derive(Clone, Default)]
pub struct FakeBuildAdapter {
    state: Arc<Mutex<FakeBuildState>>,
    calls: Arc<Mutex<Vec<BuildCall>>>,
}

impl FakeBuildAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make builds exit non-zero after writing `output`
    pub fn fail_with(&self, output: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.output = output.to_string();
        state.failure = Some("exit status 1".to_string());
    }

    /// Make builds fail before the tool runs
    pub fn fail_to_spawn(&self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).spawn_failure = true;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<BuildCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of builds actually invoked
    pub fn build_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BuildCall::Build { .. }))
            .count()
    }
}

#[async_trait]
impl BuildAdapter for FakeBuildAdapter {
    async fn version(&self) -> Result<String, BuildError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(BuildCall::Version);
        Ok("0.11.0-fake".to_string())
    }

    async fn build(&self, checkout: &Path, image_id: &str, log: &LogTee) -> Result<(), BuildError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(BuildCall::Build {
                checkout: checkout.to_path_buf(),
                image_id: image_id.to_string(),
            });

        let (output, failure, spawn_failure) = {
            let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            (state.output.clone(), state.failure.clone(), state.spawn_failure)
        };

        if spawn_failure {
            return Err(BuildError::Spawn {
                program: "jupyter-repo2docker".to_string(),
                reason: "No such file or directory (os error 2)".to_string(),
            });
        }

        let _ = log.write_str(&output).await;
        match failure {
            Some(reason) => Err(BuildError::Failed {
                image: image_id.to_string(),
                reason,
            }),
            None => {
                let _ = log
                    .write_str(&format!("Successfully tagged {}\n", image_id))
                    .await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
