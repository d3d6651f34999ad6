// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for checking a repository

use r2dc_adapters::{BuildError, ContainerError, RepoError};
use r2dc_storage::LedgerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while checking a repository
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] RepoError),
    #[error("build failed: {0}")]
    Build(#[from] BuildError),
    #[error("container error: {0}")]
    Container(#[from] ContainerError),
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CheckError::Io { path, source }
    }

    /// Local failures (directories, ledger, log files) that abort the
    /// repository instead of being recorded as a failed result
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, CheckError::Ledger(_) | CheckError::Io { .. })
    }

    /// True when the build tool ran and exited non-zero; its own output
    /// is then already in the build log
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, CheckError::Build(e) if e.is_tool_failure())
    }
}
