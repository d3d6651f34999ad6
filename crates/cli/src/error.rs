// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing startup errors with context and suggestions.
//!
//! Only configuration and argument problems surface here; failures while
//! checking a repository are recorded in its results instead.

use r2dc_core::{ConfigError, SpecError};
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// A repository token could not be parsed
    pub fn invalid_repo(token: &str, err: SpecError) -> Self {
        CliError::new(format!("invalid repository '{}'", token))
            .with_context(err.to_string())
            .with_suggestion("Use org/repo, host/org/repo or a full URL")
            .with_suggestion("Append @ref to test a branch, tag or commit, e.g. org/repo@main")
            .with_source(err)
    }

    /// The configuration file is missing or malformed
    pub fn bad_config(path: &Path, err: ConfigError) -> Self {
        let suggestion = match err {
            ConfigError::Io(..) => format!("Check that {} exists and is readable", path.display()),
            ConfigError::Parse(..) => {
                "Allowed keys: run_dir, notebook_limit, notebook_timeout_secs, image_prefix, \
                 default_host, default_ref, build_command, container_command, driver_path"
                    .to_string()
            }
        };
        CliError::new(format!("cannot load configuration {}", path.display()))
            .with_context(err.to_string())
            .with_suggestion(suggestion)
            .with_source(err)
    }

    /// The run directory to migrate does not exist
    pub fn missing_run_dir(path: &Path) -> Self {
        CliError::new(format!("run directory {} does not exist", path.display()))
            .with_suggestion("Pass the directory given to --run-dir when the runs were made")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
