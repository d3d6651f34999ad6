// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production adapter factory for CLI commands

use r2dc_adapters::{
    DockerAdapter, GitAdapter, Repo2DockerAdapter, TracedBuildAdapter, TracedContainerAdapter,
    TracedRepoAdapter,
};
use r2dc_core::config::DEFAULT_DRIVER;
use r2dc_core::CheckerConfig;
use r2dc_engine::CheckerDeps;
use std::path::PathBuf;

pub type RealDeps = CheckerDeps<
    TracedRepoAdapter<GitAdapter>,
    TracedBuildAdapter<Repo2DockerAdapter>,
    TracedContainerAdapter<DockerAdapter>,
>;

/// Real git, repo2docker and docker adapters, each wrapped for tracing
pub fn real_deps(config: &CheckerConfig) -> RealDeps {
    CheckerDeps {
        repos: TracedRepoAdapter::new(GitAdapter::new()),
        builder: TracedBuildAdapter::new(Repo2DockerAdapter::new(&config.build_command)),
        containers: TracedContainerAdapter::new(DockerAdapter::new(&config.container_command)),
    }
}

/// The driver binary installed next to the running executable
pub fn bundled_driver() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_DRIVER))
}
