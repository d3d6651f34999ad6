// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test result records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognized test kind
#[derive(Debug, Error, PartialEq)]
#[error("unknown test kind: {0}")]
pub struct UnknownKind(pub String);

/// What a result record checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    /// Building the image (always the first record)
    Build,
    /// Executing a notebook in the image
    Notebook,
    /// Importing a module in the image
    Import,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Build => "build",
            TestKind::Notebook => "notebook",
            TestKind::Import => "import",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(TestKind::Build),
            "notebook" => Ok(TestKind::Notebook),
            "import" => Ok(TestKind::Import),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// One completed check, as stored in a result ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub repo: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub resolved_ref: String,
    pub last_modified: String,
    pub kind: TestKind,
    pub test_id: String,
    pub success: bool,
    /// Log file, relative to the run directory
    pub path: String,
    pub timestamp: String,
    pub run_id: String,
    pub repo2docker_version: String,
}

impl TestResult {
    /// Column names, in ledger order
    pub const FIELDS: [&'static str; 11] = [
        "repo",
        "ref",
        "resolved_ref",
        "last_modified",
        "kind",
        "test_id",
        "success",
        "path",
        "timestamp",
        "run_id",
        "repo2docker_version",
    ];

    /// Field values, in ledger order
    pub fn values(&self) -> [String; 11] {
        [
            self.repo.clone(),
            self.git_ref.clone(),
            self.resolved_ref.clone(),
            self.last_modified.clone(),
            self.kind.to_string(),
            self.test_id.clone(),
            self.success.to_string(),
            self.path.clone(),
            self.timestamp.clone(),
            self.run_id.clone(),
            self.repo2docker_version.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [TestKind::Build, TestKind::Notebook, TestKind::Import] {
            assert_eq!(kind.as_str().parse::<TestKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(
            "lint".parse::<TestKind>(),
            Err(UnknownKind("lint".to_string()))
        );
    }

    #[test]
    fn values_follow_field_order() {
        let result = TestResult {
            repo: "https://github.com/org/repo".to_string(),
            git_ref: "master".to_string(),
            resolved_ref: "abc".to_string(),
            last_modified: "2020-07-01T14:23:17+02:00".to_string(),
            kind: TestKind::Notebook,
            test_id: "a.ipynb".to_string(),
            success: false,
            path: "logs/x.txt".to_string(),
            timestamp: "t".to_string(),
            run_id: "r".to_string(),
            repo2docker_version: "0.11.0".to_string(),
        };
        let values = result.values();
        assert_eq!(values[1], "master");
        assert_eq!(values[4], "notebook");
        assert_eq!(values[6], "false");
        assert_eq!(values.len(), TestResult::FIELDS.len());
    }
}
