// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a test run inside the container
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid notebook {}: {source}", path.display())]
    Notebook {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot list kernel specs: {0}")]
    KernelSpecs(String),
    #[error("import of {module} failed ({status})")]
    ImportFailed { module: String, status: String },
    #[error("execution of {} failed ({status})", notebook.display())]
    ExecutionFailed { notebook: PathBuf, status: String },
    #[error("{} raised {count} error(s)", notebook.display())]
    CellErrors { notebook: PathBuf, count: usize },
}
