// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable per-repository summary

use r2dc_core::TestResult;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Summary of one repository run, built from its ledger records.
///
/// The first record is the build record; everything after it is a test.
#[derive(Debug, Clone)]
pub struct RepoSummary {
    results: Vec<TestResult>,
    result_file: PathBuf,
    run_dir: PathBuf,
}

impl RepoSummary {
    /// Returns `None` when there is no build record to summarize
    pub fn new(results: Vec<TestResult>, result_file: &Path, run_dir: &Path) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        Some(Self {
            results,
            result_file: result_file.to_path_buf(),
            run_dir: run_dir.to_path_buf(),
        })
    }

    pub fn build(&self) -> &TestResult {
        &self.results[0]
    }

    pub fn tests(&self) -> &[TestResult] {
        &self.results[1..]
    }

    pub fn build_failed(&self) -> bool {
        !self.build().success
    }

    /// `kind:ok` / `kind:fail` counts, sorted by key
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for result in self.tests() {
            let status = if result.success { "ok" } else { "fail" };
            *counts.entry(format!("{}:{}", result.kind, status)).or_insert(0) += 1;
        }
        counts
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.tests().iter().filter(|r| !r.success)
    }

    /// True when the build passed and every test passed
    pub fn is_ok(&self) -> bool {
        !self.build_failed() && self.failures().next().is_none()
    }

    fn log_path(&self, result: &TestResult) -> PathBuf {
        self.run_dir.join(&result.path)
    }
}

impl fmt::Display for RepoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let build = self.build();
        writeln!(
            f,
            "Result summary for {}@{}-{}:",
            build.repo, build.git_ref, build.resolved_ref
        )?;
        writeln!(f, "  Result file: {}", self.result_file.display())?;

        if self.build_failed() {
            return writeln!(
                f,
                "Build failed, see {} for details",
                self.log_path(build).display()
            );
        }
        if self.tests().is_empty() {
            return writeln!(f, "  No tests found!");
        }

        writeln!(f, "  test:status: count")?;
        for (key, count) in self.counts() {
            writeln!(f, "  {key}: {count}")?;
        }

        let failures: Vec<_> = self.failures().collect();
        if failures.is_empty() {
            return writeln!(f, "OK!");
        }
        let noun = if failures.len() == 1 { "failure" } else { "failures" };
        writeln!(f, "  {} {}:", failures.len(), noun)?;
        for result in failures {
            writeln!(
                f,
                "    {} {}: {}",
                result.kind,
                result.test_id,
                self.log_path(result).display()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
