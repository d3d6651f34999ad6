// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r2dc-core: domain types for the repo2docker notebook checker
//!
//! This crate provides:
//! - Repository specs, slugs, and deterministic image ids
//! - Test result records and kinds
//! - Run configuration
//! - Notebook discovery within a checkout

pub mod clock;
pub mod config;
pub mod discover;
pub mod result;
pub mod slug;
pub mod spec;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{CheckerConfig, ConfigError, FileConfig, RUN_ID_ENV};
pub use discover::{find_notebooks, CHECKPOINT_DIR, NOTEBOOK_EXTENSION};
pub use result::{TestKind, TestResult, UnknownKind};
pub use slug::{image_id, path_safe, repo_run_path, repo_slug};
pub use spec::{RepoSpec, SpecError};
