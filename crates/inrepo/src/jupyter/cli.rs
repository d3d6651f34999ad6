// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jupyter access through the `jupyter` and `python3` executables

use super::{ExecuteRequest, Jupyter};
use crate::error::DriverError;
use crate::kernel::{parse_kernel_specs, KernelSpecs};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

const IMPORT_SNIPPET: &str = "import importlib, sys; importlib.import_module(sys.argv[1])";

/// Runs the image's own `jupyter` and `python3`
#[derive(Debug, Clone)]
pub struct JupyterCli {
    python: String,
    jupyter: String,
}

impl JupyterCli {
    pub fn new(python: impl Into<String>, jupyter: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            jupyter: jupyter.into(),
        }
    }

    /// Build the `jupyter nbconvert` invocation for a request
    pub fn nbconvert_args(request: &ExecuteRequest<'_>) -> Vec<String> {
        let mut args = vec![
            "nbconvert".to_string(),
            "--to".to_string(),
            "notebook".to_string(),
            "--execute".to_string(),
            "--allow-errors".to_string(),
            format!("--ExecutePreprocessor.timeout={}", request.timeout_secs),
        ];
        if let Some(kernel) = request.kernel {
            args.push(format!("--ExecutePreprocessor.kernel_name={}", kernel));
        }
        if let Some(dir) = request.dest.parent() {
            args.push("--output-dir".to_string());
            args.push(dir.to_string_lossy().into_owned());
        }
        if let Some(name) = request.dest.file_name() {
            args.push("--output".to_string());
            args.push(name.to_string_lossy().into_owned());
        }
        args.push(request.notebook.to_string_lossy().into_owned());
        args
    }

    async fn status(&self, program: &str, cmd: &mut Command) -> Result<ExitStatus, DriverError> {
        cmd.stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| DriverError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

impl Default for JupyterCli {
    fn default() -> Self {
        Self::new("python3", "jupyter")
    }
}

#[async_trait]
impl Jupyter for JupyterCli {
    async fn kernel_specs(&self) -> Result<KernelSpecs, DriverError> {
        let output = Command::new(&self.jupyter)
            .args(["kernelspec", "list", "--json"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| DriverError::Spawn {
                program: self.jupyter.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DriverError::KernelSpecs(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        parse_kernel_specs(&String::from_utf8_lossy(&output.stdout))
            .map_err(|e| DriverError::KernelSpecs(e.to_string()))
    }

    async fn execute(&self, request: &ExecuteRequest<'_>) -> Result<(), DriverError> {
        // output goes straight to the container log
        let status = self
            .status(
                &self.jupyter,
                Command::new(&self.jupyter).args(Self::nbconvert_args(request)),
            )
            .await?;
        if !status.success() {
            return Err(DriverError::ExecutionFailed {
                notebook: request.notebook.to_path_buf(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    async fn import_module(&self, module: &str) -> Result<(), DriverError> {
        let status = self
            .status(
                &self.python,
                Command::new(&self.python).args(["-c", IMPORT_SNIPPET, module]),
            )
            .await?;
        if !status.success() {
            return Err(DriverError::ImportFailed {
                module: module.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
