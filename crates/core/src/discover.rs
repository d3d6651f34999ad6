// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notebook discovery within a checkout

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Autosave directory written by Jupyter; its copies are never tested
pub const CHECKPOINT_DIR: &str = ".ipynb_checkpoints";

/// Yield the path of every notebook under `root`, relative to `root`.
///
/// Checkpoint directories are pruned at any depth. Each call starts a fresh
/// walk; results come in walk order, so sort if you need determinism.
pub fn find_notebooks(root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_checkpoint_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.ends_with(NOTEBOOK_EXTENSION))
        })
        .filter_map(move |entry| entry.path().strip_prefix(root).ok().map(Path::to_path_buf))
}

fn is_checkpoint_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == CHECKPOINT_DIR
}

#[cfg(test)]
#[path = "discover_tests.rs"]
mod tests;
