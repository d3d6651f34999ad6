// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake Jupyter for driver tests

use super::{ExecuteRequest, Jupyter};
use crate::error::DriverError;
use crate::kernel::{KernelSpec, KernelSpecs};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum JupyterCall {
    KernelSpecs,
    Execute {
        notebook: PathBuf,
        kernel: Option<String>,
        dest: PathBuf,
        timeout_secs: u64,
    },
    Import {
        module: String,
    },
}

#[derive(Default)]
struct FakeJupyterState {
    specs: Option<KernelSpecs>,
    /// Written to the destination instead of actually executing
    executed: Option<String>,
    importable: HashSet<String>,
}

/// Fake Jupyter that copies notebooks instead of executing them
#[derive(Clone, Default)]
pub struct FakeJupyter {
    state: Arc<Mutex<FakeJupyterState>>,
    calls: Arc<Mutex<Vec<JupyterCall>>>,
}

impl FakeJupyter {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.add_kernel("python3", "python");
        fake
    }

    pub fn add_kernel(&self, name: &str, language: &str) {
        self.lock()
            .specs
            .get_or_insert_with(KernelSpecs::new)
            .insert(
                name.to_string(),
                KernelSpec {
                    language: language.to_string(),
                    display_name: name.to_string(),
                },
            );
    }

    /// Make listing kernel specs fail
    pub fn fail_kernel_specs(&self) {
        self.lock().specs = None;
    }

    /// Write `notebook` as the executed result
    pub fn set_executed(&self, notebook: &str) {
        self.lock().executed = Some(notebook.to_string());
    }

    /// Make execution fail, as with a timeout or dead kernel
    pub fn fail_execute(&self) {
        self.lock().executed = None;
    }

    pub fn allow_import(&self, module: &str) {
        self.lock().importable.insert(module.to_string());
    }

    pub fn calls(&self) -> Vec<JupyterCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeJupyterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: JupyterCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait]
impl Jupyter for FakeJupyter {
    async fn kernel_specs(&self) -> Result<KernelSpecs, DriverError> {
        self.record(JupyterCall::KernelSpecs);
        self.lock()
            .specs
            .clone()
            .ok_or_else(|| DriverError::KernelSpecs("jupyter: command not found".to_string()))
    }

    async fn execute(&self, request: &ExecuteRequest<'_>) -> Result<(), DriverError> {
        self.record(JupyterCall::Execute {
            notebook: request.notebook.to_path_buf(),
            kernel: request.kernel.map(str::to_string),
            dest: request.dest.to_path_buf(),
            timeout_secs: request.timeout_secs,
        });

        let executed = self.lock().executed.clone();
        match executed {
            Some(content) => std::fs::write(request.dest, content).map_err(|source| {
                DriverError::Io {
                    path: request.dest.to_path_buf(),
                    source,
                }
            }),
            None => Err(DriverError::ExecutionFailed {
                notebook: request.notebook.to_path_buf(),
                status: "exit status: 1".to_string(),
            }),
        }
    }

    async fn import_module(&self, module: &str) -> Result<(), DriverError> {
        self.record(JupyterCall::Import {
            module: module.to_string(),
        });
        if self.lock().importable.contains(module) {
            Ok(())
        } else {
            Err(DriverError::ImportFailed {
                module: module.to_string(),
                status: "exit status: 1".to_string(),
            })
        }
    }
}
