// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading notebook documents

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Kernel declared in a notebook's `metadata.kernelspec`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeclaredKernel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl DeclaredKernel {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    metadata: Metadata,
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Default, Deserialize)]
struct Metadata {
    #[serde(default)]
    kernelspec: Option<DeclaredKernel>,
}

#[derive(Deserialize)]
struct Cell {
    #[serde(default)]
    outputs: Vec<Output>,
}

#[derive(Deserialize)]
struct Output {
    output_type: String,
    #[serde(default)]
    ename: String,
    #[serde(default)]
    evalue: String,
}

/// An `error` output left in an executed notebook
#[derive(Debug, Clone, PartialEq)]
pub struct CellError {
    /// Index of the cell in the notebook
    pub cell: usize,
    pub ename: String,
    pub evalue: String,
}

/// The kernel a notebook asks for; empty when it declares none
pub fn declared_kernel(json: &str) -> Result<DeclaredKernel, serde_json::Error> {
    let doc: Document = serde_json::from_str(json)?;
    Ok(doc.metadata.kernelspec.unwrap_or_default())
}

/// Every error output, in cell order
pub fn error_outputs(json: &str) -> Result<Vec<CellError>, serde_json::Error> {
    let doc: Document = serde_json::from_str(json)?;
    Ok(doc
        .cells
        .into_iter()
        .enumerate()
        .flat_map(|(index, cell)| {
            cell.outputs
                .into_iter()
                .filter(|o| o.output_type == "error")
                .map(move |o| CellError {
                    cell: index,
                    ename: o.ename,
                    evalue: o.evalue,
                })
        })
        .collect())
}

/// Where the executed copy of `notebook` is written: its path relative to
/// the working directory, under `{output_dir}/notebooks`
pub fn output_path(output_dir: &Path, notebook: &Path, cwd: &Path) -> PathBuf {
    let relative = if notebook.is_absolute() {
        notebook.strip_prefix(cwd).unwrap_or(notebook)
    } else {
        notebook
    };
    // an absolute remainder would replace output_dir in join()
    let relative: PathBuf = relative
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect();
    output_dir.join("notebooks").join(relative)
}

#[cfg(test)]
#[path = "notebook_tests.rs"]
mod tests;
