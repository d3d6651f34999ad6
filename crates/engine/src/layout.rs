// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! On-disk layout of one repository run

use r2dc_core::{path_safe, CheckerConfig, RepoSpec, TestKind};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Paths for one (repo, ref, run id) under the run directory.
///
/// ```text
/// {run_dir}/{host}/{o}/{org}/{repo}/
///     logs/build-{ref}-{run_id}.txt
///     logs/test-notebook-{path}-{run_id}.txt
///     results/results-{ref}-{run_id}.csv
///     notebooks/{path}
/// ```
#[derive(Debug, Clone)]
pub struct RepoLayout {
    run_dir: PathBuf,
    run_id: String,
    pub repo_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub results_dir: PathBuf,
    pub result_file: PathBuf,
    pub build_log: PathBuf,
}

impl RepoLayout {
    pub fn new(config: &CheckerConfig, spec: &RepoSpec) -> Self {
        let repo_dir = config.repo_dir(&spec.url);
        let logs_dir = repo_dir.join("logs");
        let results_dir = repo_dir.join("results");
        let git_ref = path_safe(&spec.git_ref);
        Self {
            result_file: results_dir.join(format!("results-{}-{}.csv", git_ref, config.run_id)),
            build_log: logs_dir.join(format!("build-{}-{}.txt", git_ref, config.run_id)),
            run_dir: config.run_dir.clone(),
            run_id: config.run_id.clone(),
            repo_dir,
            logs_dir,
            results_dir,
        }
    }

    /// Create the log and result directories
    pub fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.logs_dir)?;
        fs::create_dir_all(&self.results_dir)
    }

    /// Log file for one test
    pub fn test_log(&self, kind: TestKind, test_id: &str) -> PathBuf {
        self.logs_dir.join(format!(
            "test-{}-{}-{}.txt",
            kind,
            path_safe(test_id),
            self.run_id
        ))
    }

    /// Log file for one test that differs from every path in `taken`.
    ///
    /// Flattening `/` to `-` maps `a/b.ipynb` and `a-b.ipynb` to one name;
    /// later tests get a `.{n}` suffix after the test id.
    pub fn unique_test_log(
        &self,
        kind: TestKind,
        test_id: &str,
        taken: &HashSet<PathBuf>,
    ) -> PathBuf {
        let base = self.test_log(kind, test_id);
        if !taken.contains(&base) {
            return base;
        }
        (2..)
            .map(|n| {
                self.logs_dir.join(format!(
                    "test-{}-{}.{}-{}.txt",
                    kind,
                    path_safe(test_id),
                    n,
                    self.run_id
                ))
            })
            .find(|path| !taken.contains(path))
            .unwrap_or(base)
    }

    /// Path as recorded in the ledger: relative to the run directory
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.run_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
