// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run configuration
//!
//! A [`CheckerConfig`] is built once at startup (defaults, then an optional
//! TOML file, then the `RUN_ID` environment override, then CLI flags) and is
//! passed by reference to every component.

use crate::clock::Clock;
use crate::slug::repo_run_path;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the timestamp-derived run id
pub const RUN_ID_ENV: &str = "RUN_ID";

pub const DEFAULT_RUN_DIR: &str = "./runs";
pub const DEFAULT_NOTEBOOK_LIMIT: usize = 5;
pub const DEFAULT_NOTEBOOK_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_IMAGE_PREFIX: &str = "r2d-test-";
pub const DEFAULT_HOST: &str = "https://github.com";
pub const DEFAULT_REF: &str = "master";
pub const DEFAULT_BUILD_COMMAND: &str = "jupyter-repo2docker";
pub const DEFAULT_CONTAINER_COMMAND: &str = "docker";
pub const DEFAULT_DRIVER: &str = "r2dc-inrepo";

/// Errors loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),
}

/// Settings shared by every component of a run
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Root under which all per-repo logs and results are written
    pub run_dir: PathBuf,
    pub run_id: String,
    /// Run timestamp recorded in every result
    pub timestamp: String,
    /// Suppress echoing tool output to the console
    pub quiet: bool,
    /// Maximum notebooks tested per repository (0 = no limit)
    pub notebook_limit: usize,
    /// Per-notebook execution timeout passed to the driver
    pub notebook_timeout_secs: u64,
    /// Rebuild images even if they already exist
    pub force_build: bool,
    pub image_prefix: String,
    /// Host prepended to short `org/repo` specs
    pub default_host: String,
    /// Ref used when a spec names none
    pub default_ref: String,
    pub build_command: String,
    pub container_command: String,
    /// Host path of the in-container driver binary
    pub driver_path: PathBuf,
}

impl CheckerConfig {
    /// Defaults, with run identity taken from the clock
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            run_dir: PathBuf::from(DEFAULT_RUN_DIR),
            run_id: clock.run_id(),
            timestamp: clock.timestamp(),
            quiet: false,
            notebook_limit: DEFAULT_NOTEBOOK_LIMIT,
            notebook_timeout_secs: DEFAULT_NOTEBOOK_TIMEOUT_SECS,
            force_build: false,
            image_prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            default_host: DEFAULT_HOST.to_string(),
            default_ref: DEFAULT_REF.to_string(),
            build_command: DEFAULT_BUILD_COMMAND.to_string(),
            container_command: DEFAULT_CONTAINER_COMMAND.to_string(),
            driver_path: PathBuf::from(DEFAULT_DRIVER),
        }
    }

    /// Override the run id (e.g. from `RUN_ID`); empty values are ignored
    pub fn with_run_id(mut self, run_id: Option<String>) -> Self {
        if let Some(id) = run_id.filter(|id| !id.trim().is_empty()) {
            self.run_id = id;
        }
        self
    }

    /// Apply values set in a configuration file
    pub fn apply(&mut self, file: FileConfig) {
        if let Some(v) = file.run_dir {
            self.run_dir = v;
        }
        if let Some(v) = file.notebook_limit {
            self.notebook_limit = v;
        }
        if let Some(v) = file.notebook_timeout_secs {
            self.notebook_timeout_secs = v;
        }
        if let Some(v) = file.image_prefix {
            self.image_prefix = v;
        }
        if let Some(v) = file.default_host {
            self.default_host = v;
        }
        if let Some(v) = file.default_ref {
            self.default_ref = v;
        }
        if let Some(v) = file.build_command {
            self.build_command = v;
        }
        if let Some(v) = file.container_command {
            self.container_command = v;
        }
        if let Some(v) = file.driver_path {
            self.driver_path = v;
        }
    }

    /// Directory holding one repository's logs, results and notebooks
    pub fn repo_dir(&self, url: &str) -> PathBuf {
        self.run_dir.join(repo_run_path(url))
    }
}

/// Optional settings read from a TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub run_dir: Option<PathBuf>,
    pub notebook_limit: Option<usize>,
    pub notebook_timeout_secs: Option<u64>,
    pub image_prefix: Option<String>,
    pub default_host: Option<String>,
    pub default_ref: Option<String>,
    pub build_command: Option<String>,
    pub container_command: Option<String>,
    pub driver_path: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
