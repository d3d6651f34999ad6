// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Kernel resolution for notebooks whose declared kernel is not installed

use crate::notebook::DeclaredKernel;
use serde::Deserialize;
use std::collections::BTreeMap;

/// The parts of an installed kernel spec the driver cares about
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KernelSpec {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub display_name: String,
}

/// Installed kernels by name, iterated in ascending name order
pub type KernelSpecs = BTreeMap<String, KernelSpec>;

#[derive(Deserialize)]
struct KernelSpecList {
    kernelspecs: BTreeMap<String, KernelSpecEntry>,
}

#[derive(Deserialize)]
struct KernelSpecEntry {
    spec: KernelSpec,
}

/// Parse the output of `jupyter kernelspec list --json`
pub fn parse_kernel_specs(json: &str) -> Result<KernelSpecs, serde_json::Error> {
    let list: KernelSpecList = serde_json::from_str(json)?;
    Ok(list
        .kernelspecs
        .into_iter()
        .map(|(name, entry)| (name, entry.spec))
        .collect())
}

/// Which kernel will execute a notebook
#[derive(Debug, Clone, PartialEq)]
pub enum KernelChoice {
    /// The declared kernel is installed
    Exact(String),
    /// The declared kernel is missing; another kernel for the same language is used
    ByLanguage { name: String, language: String },
    /// Nothing matched; the executor falls back to the notebook's metadata
    Unresolved,
}

impl KernelChoice {
    /// Kernel name to pass to the executor, if any
    pub fn kernel_name(&self) -> Option<&str> {
        match self {
            KernelChoice::Exact(name) | KernelChoice::ByLanguage { name, .. } => Some(name),
            KernelChoice::Unresolved => None,
        }
    }
}

/// Pick the kernel for a notebook.
///
/// Exact name match first; otherwise the first installed kernel, in
/// ascending name order, whose language matches case-insensitively.
pub fn resolve_kernel(declared: &DeclaredKernel, specs: &KernelSpecs) -> KernelChoice {
    let name = declared.name();
    if !name.is_empty() && specs.contains_key(name) {
        return KernelChoice::Exact(name.to_string());
    }

    let language = declared.language().to_lowercase();
    if language.is_empty() {
        return KernelChoice::Unresolved;
    }
    specs
        .iter()
        .find(|(_, spec)| spec.language.to_lowercase() == language)
        .map_or(KernelChoice::Unresolved, |(name, _)| KernelChoice::ByLanguage {
            name: name.clone(),
            language,
        })
}

/// One-line listing of installed kernels for diagnostics
pub fn describe_specs(specs: &KernelSpecs) -> String {
    specs
        .iter()
        .map(|(name, spec)| format!("name={}, language={}", name, spec.language))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
