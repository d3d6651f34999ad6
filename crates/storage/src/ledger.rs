// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only CSV ledger of test results

use crate::csv;
use r2dc_core::{TestKind, TestResult};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur reading or writing a ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ledger {}: unexpected header", path.display())]
    Header { path: PathBuf },
    #[error("ledger {}, line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Result ledger for one (repo, ref, run id).
///
/// Every append is synced before returning, so a crash loses at most the
/// record being written.
#[derive(Debug)]
pub struct ResultLedger {
    file: File,
    path: PathBuf,
    records: usize,
}

impl ResultLedger {
    /// Create (or truncate) the ledger and write the header row
    pub fn create(path: &Path) -> Result<Self, LedgerError> {
        let io_err = |source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(io_err)?;

        let mut ledger = Self {
            file,
            path: path.to_path_buf(),
            records: 0,
        };
        ledger
            .write_row(&csv::encode_row(&TestResult::FIELDS))
            .map_err(io_err)?;
        Ok(ledger)
    }

    /// Append one record
    pub fn append(&mut self, result: &TestResult) -> Result<(), LedgerError> {
        let row = csv::encode_row(&result.values());
        self.write_row(&row).map_err(|source| LedgerError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.records += 1;
        tracing::debug!(
            path = %self.path.display(),
            kind = %result.kind,
            test_id = %result.test_id,
            "appended result"
        );
        Ok(())
    }

    fn write_row(&mut self, row: &str) -> io::Result<()> {
        self.file.write_all(row.as_bytes())?;
        self.file.flush()?;
        self.file.sync_all()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records appended through this handle
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Read every record back from a ledger file
    pub fn read(path: &Path) -> Result<Vec<TestResult>, LedgerError> {
        let content = std::fs::read_to_string(path).map_err(|source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let malformed = |line, reason: String| LedgerError::Malformed {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let rows = csv::decode(&content)
            .map_err(|csv::Unterminated(line)| malformed(line, "unterminated quote".into()))?;
        let mut rows = rows.into_iter();

        match rows.next() {
            Some(header) if header.fields == TestResult::FIELDS => {}
            _ => {
                return Err(LedgerError::Header {
                    path: path.to_path_buf(),
                })
            }
        }

        rows.map(|row| parse_record(row.fields).map_err(|reason| malformed(row.line, reason)))
            .collect()
    }
}

fn parse_record(fields: Vec<String>) -> Result<TestResult, String> {
    let fields: [String; 11] = fields
        .try_into()
        .map_err(|f: Vec<String>| format!("expected 11 fields, found {}", f.len()))?;
    let [repo, git_ref, resolved_ref, last_modified, kind, test_id, success, path, timestamp, run_id, repo2docker_version] =
        fields;

    let kind: TestKind = kind.parse().map_err(|e| format!("{e}"))?;
    // ledgers written by older tooling use Python's True/False
    let success = match success.as_str() {
        "true" | "True" => true,
        "false" | "False" => false,
        other => return Err(format!("invalid success value: {other}")),
    };

    Ok(TestResult {
        repo,
        git_ref,
        resolved_ref,
        last_modified,
        kind,
        test_id,
        success,
        path,
        timestamp,
        run_id,
        repo2docker_version,
    })
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
