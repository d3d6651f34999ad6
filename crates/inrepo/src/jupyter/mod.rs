// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access to the image's Python and Jupyter installation

mod cli;

pub use cli::JupyterCli;

#[cfg(test)]
mod fake;
#[cfg(test)]
pub use fake::{FakeJupyter, JupyterCall};

use crate::error::DriverError;
use crate::kernel::KernelSpecs;
use async_trait::async_trait;
use std::path::Path;

/// One notebook execution
#[derive(Debug, Clone, Copy)]
pub struct ExecuteRequest<'a> {
    pub notebook: &'a Path,
    /// Kernel override; `None` uses the notebook's metadata
    pub kernel: Option<&'a str>,
    /// File the executed notebook is written to
    pub dest: &'a Path,
    pub timeout_secs: u64,
}

/// Operations the driver needs from the image's toolchain
#[async_trait]
pub trait Jupyter: Send + Sync {
    /// Installed kernel specs
    async fn kernel_specs(&self) -> Result<KernelSpecs, DriverError>;

    /// Execute a notebook, keeping cell errors in the written copy
    async fn execute(&self, request: &ExecuteRequest<'_>) -> Result<(), DriverError>;

    /// Import a module with the image's interpreter
    async fn import_module(&self, module: &str) -> Result<(), DriverError>;
}
