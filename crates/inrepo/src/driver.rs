// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two test kinds the driver can run

use crate::error::DriverError;
use crate::jupyter::{ExecuteRequest, Jupyter};
use crate::kernel::{describe_specs, resolve_kernel, KernelChoice, KernelSpecs};
use crate::notebook;
use std::fmt;
use std::path::{Path, PathBuf};

/// Test kinds understood by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TestType {
    /// Import a module
    Import,
    /// Execute a notebook
    Notebook,
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestType::Import => "import",
            TestType::Notebook => "notebook",
        })
    }
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Mounted directory receiving executed notebooks
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    /// Working directory notebook paths are relative to
    pub cwd: PathBuf,
}

pub struct Driver<J> {
    jupyter: J,
    config: DriverConfig,
}

impl<J: Jupyter> Driver<J> {
    pub fn new(jupyter: J, config: DriverConfig) -> Self {
        Self { jupyter, config }
    }

    /// Run one test; `Ok` means it passed
    pub async fn run(&self, test: TestType, argument: &str) -> Result<(), DriverError> {
        match test {
            TestType::Import => self.import_test(argument).await,
            TestType::Notebook => self.run_notebook(Path::new(argument)).await.map(|_| ()),
        }
    }

    pub async fn import_test(&self, module: &str) -> Result<(), DriverError> {
        tracing::info!("testing import of {}", module);
        self.jupyter.import_module(module).await
    }

    /// Execute a notebook and save the executed copy.
    ///
    /// Fails if execution fails or if any cell left an error output; the
    /// saved copy keeps those outputs either way. Returns the saved path.
    pub async fn run_notebook(&self, path: &Path) -> Result<PathBuf, DriverError> {
        tracing::info!("testing notebook {}", path.display());
        let source = read(path)?;
        let declared = notebook::declared_kernel(&source).map_err(|source| {
            DriverError::Notebook {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let specs = match self.jupyter.kernel_specs().await {
            Ok(specs) => specs,
            Err(e) => {
                tracing::warn!(error = %e, "cannot list kernels, using notebook metadata");
                KernelSpecs::new()
            }
        };
        let choice = resolve_kernel(&declared, &specs);
        match &choice {
            KernelChoice::Exact(name) => tracing::info!("found kernel {}", name),
            KernelChoice::ByLanguage { name, language } => tracing::warn!(
                "no such kernel {:?}, using kernel {} to provide language {}",
                declared.name(),
                name,
                language
            ),
            KernelChoice::Unresolved => {
                tracing::warn!(
                    "found no matching kernel for name={:?}, language={:?}",
                    declared.name(),
                    declared.language()
                );
                tracing::warn!("found kernel specs: {}", describe_specs(&specs));
            }
        }

        let dest = notebook::output_path(&self.config.output_dir, path, &self.config.cwd);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(|source| DriverError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        tracing::info!("saving executed notebook to {}", dest.display());
        self.jupyter
            .execute(&ExecuteRequest {
                notebook: path,
                kernel: choice.kernel_name(),
                dest: &dest,
                timeout_secs: self.config.timeout_secs,
            })
            .await?;

        let executed = read(&dest)?;
        let errors = notebook::error_outputs(&executed).map_err(|source| DriverError::Notebook {
            path: dest.clone(),
            source,
        })?;
        if !errors.is_empty() {
            for error in &errors {
                tracing::error!(cell = error.cell, "{}: {}", error.ename, error.evalue);
            }
            return Err(DriverError::CellErrors {
                notebook: path.to_path_buf(),
                count: errors.len(),
            });
        }
        Ok(dest)
    }
}

fn read(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
