// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external tools: git, the image build tool, the container runtime

pub mod build;
pub mod container;
mod process;
pub mod repo;
pub mod tee;
pub mod traced;

pub use build::{BuildAdapter, BuildError, Repo2DockerAdapter};
pub use container::{ContainerAdapter, ContainerError, ContainerSpec, DockerAdapter, Mount};
pub use repo::{GitAdapter, RepoAdapter, RepoError};
pub use tee::{LogTee, Source, Utf8Decoder};
pub use traced::{TracedBuildAdapter, TracedContainerAdapter, TracedRepoAdapter};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use build::{BuildCall, FakeBuildAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use container::{ContainerCall, FakeContainer, FakeContainerAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use repo::{FakeRepoAdapter, RepoCall};
