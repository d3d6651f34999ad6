// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repository specs parsed from `repo[@ref]` tokens

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors from parsing a repository token
#[derive(Debug, Error, PartialEq)]
pub enum SpecError {
    #[error("empty repository spec")]
    Empty,
    #[error("repository spec has an empty ref: {0}")]
    EmptyRef(String),
    #[error("repository spec has no path: {0}")]
    MissingPath(String),
}

/// A repository URL and the ref to test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSpec {
    pub url: String,
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl RepoSpec {
    pub fn new(url: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            git_ref: git_ref.into(),
        }
    }

    /// Parse a CLI token of the form `[[scheme://]host/]org/repo[@ref]`.
    ///
    /// A scheme-less token whose first segment is a hostname gets `https://`;
    /// other tokens without a scheme are expanded against `default_host`. The ref
    /// is whatever follows the first `@` in the path, so refs may contain
    /// `/` and URLs may still carry userinfo (`https://user@host/...`).
    pub fn parse(token: &str, default_host: &str, default_ref: &str) -> Result<Self, SpecError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(SpecError::Empty);
        }

        let expanded = if token.contains("://") {
            token.to_string()
        } else if names_host(token) {
            format!("https://{}", token)
        } else {
            format!(
                "{}/{}",
                default_host.trim_end_matches('/'),
                token.trim_start_matches('/')
            )
        };

        let authority_start = expanded.find("://").map_or(0, |idx| idx + 3);
        let path_start = expanded[authority_start..]
            .find('/')
            .map(|idx| authority_start + idx)
            .ok_or_else(|| SpecError::MissingPath(token.to_string()))?;

        let (url, git_ref) = match expanded[path_start..].split_once('@') {
            Some((path, git_ref)) => {
                if git_ref.is_empty() {
                    return Err(SpecError::EmptyRef(token.to_string()));
                }
                (
                    format!("{}{}", &expanded[..path_start], path),
                    git_ref.to_string(),
                )
            }
            None => (expanded.clone(), default_ref.to_string()),
        };

        if url[path_start..].trim_matches('/').is_empty() {
            return Err(SpecError::MissingPath(token.to_string()));
        }

        Ok(Self { url, git_ref })
    }
}

/// Whether a scheme-less token starts with a host, as in `gitlab.com/org/repo`.
///
/// Only tokens with at least three path segments qualify; `org/repo` always
/// expands against the default host.
fn names_host(token: &str) -> bool {
    let path = token.split_once('@').map_or(token, |(path, _)| path);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    let Some(first) = segments.next() else {
        return false;
    };
    segments.count() >= 2 && (first.contains('.') || first.contains(':'))
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.url, self.git_ref)
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
