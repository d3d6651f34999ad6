// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::build::{BuildAdapter, BuildError};
use crate::container::{ContainerAdapter, ContainerError, ContainerSpec};
use crate::repo::{RepoAdapter, RepoError};
use crate::tee::LogTee;
use async_trait::async_trait;
use std::path::Path;
use tracing::Instrument;

/// Wrapper that adds tracing to any RepoAdapter
#[derive(Clone)]
pub struct TracedRepoAdapter<R> {
    inner: R,
}

impl<R> TracedRepoAdapter<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: RepoAdapter> RepoAdapter for TracedRepoAdapter<R> {
    async fn clone_at(
        &self,
        url: &str,
        git_ref: &str,
        dest: &Path,
        progress: &LogTee,
    ) -> Result<(), RepoError> {
        let span = tracing::info_span!("repo.clone", url, git_ref, dest = %dest.display());
        async {
            tracing::info!("cloning");

            // Precondition: never clone over existing content
            let occupied = std::fs::read_dir(dest)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(false);
            if occupied {
                tracing::error!("destination is not empty");
                return Err(RepoError::CommandFailed(format!(
                    "destination is not empty: {}",
                    dest.display()
                )));
            }

            let start = std::time::Instant::now();
            let result = self.inner.clone_at(url, git_ref, dest, progress).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "cloned"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "clone failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn resolve_head(&self, checkout: &Path) -> Result<String, RepoError> {
        let result = self.inner.resolve_head(checkout).await;
        match &result {
            Ok(commit) => tracing::debug!(commit, "resolved HEAD"),
            Err(e) => tracing::warn!(error = %e, "cannot resolve HEAD"),
        }
        result
    }

    async fn last_modified(&self, checkout: &Path) -> Result<String, RepoError> {
        let result = self.inner.last_modified(checkout).await;
        tracing::trace!(last_modified = ?result.as_ref().ok(), "read commit date");
        result
    }
}

/// Wrapper that adds tracing to any BuildAdapter
#[derive(Clone)]
pub struct TracedBuildAdapter<B> {
    inner: B,
}

impl<B> TracedBuildAdapter<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<B: BuildAdapter> BuildAdapter for TracedBuildAdapter<B> {
    async fn version(&self) -> Result<String, BuildError> {
        let result = self.inner.version().await;
        match &result {
            Ok(version) => tracing::debug!(version, "build tool version"),
            Err(e) => tracing::warn!(error = %e, "cannot determine build tool version"),
        }
        result
    }

    async fn build(&self, checkout: &Path, image_id: &str, log: &LogTee) -> Result<(), BuildError> {
        let span = tracing::info_span!("image.build", image_id, checkout = %checkout.display());
        async {
            tracing::info!("building");

            // Precondition: checkout must exist
            if !checkout.is_dir() {
                tracing::error!("checkout does not exist");
                return Err(BuildError::MissingCheckout(checkout.to_path_buf()));
            }

            let start = std::time::Instant::now();
            let result = self.inner.build(checkout, image_id, log).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "image built"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "build failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any ContainerAdapter
#[derive(Clone)]
pub struct TracedContainerAdapter<C> {
    inner: C,
}

impl<C> TracedContainerAdapter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: ContainerAdapter> ContainerAdapter for TracedContainerAdapter<C> {
    async fn image_exists(&self, image: &str) -> Result<bool, ContainerError> {
        let result = self.inner.image_exists(image).await;
        tracing::debug!(image, exists = ?result.as_ref().ok(), "checked image");
        result
    }

    async fn start(&self, spec: &ContainerSpec) -> Result<String, ContainerError> {
        let span = tracing::info_span!("container.start", image = %spec.image);
        async {
            tracing::info!(command = ?spec.command, mounts = spec.mounts.len(), "starting");

            // Precondition: every mount source must exist
            if let Some(missing) = spec.mounts.iter().find(|m| !m.host.exists()) {
                tracing::error!(host = %missing.host.display(), "mount source does not exist");
                return Err(ContainerError::StartFailed(format!(
                    "mount source does not exist: {}",
                    missing.host.display()
                )));
            }

            let result = self.inner.start(spec).await;
            match &result {
                Ok(id) => tracing::info!(id, "container started"),
                Err(e) => tracing::error!(error = %e, "start failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn stream_logs(&self, id: &str, log: &LogTee) -> Result<(), ContainerError> {
        let span = tracing::debug_span!("container.logs", id);
        async {
            let result = self.inner.stream_logs(id, log).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "log stream failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn wait(&self, id: &str) -> Result<i64, ContainerError> {
        let start = std::time::Instant::now();
        let result = self.inner.wait(id).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(status) => tracing::info!(
                id,
                status,
                elapsed_ms = elapsed.as_millis() as u64,
                "container exited"
            ),
            Err(e) => tracing::error!(id, error = %e, "wait failed"),
        }
        result
    }

    async fn remove(&self, id: &str) -> Result<(), ContainerError> {
        let result = self.inner.remove(id).await;
        // removal failing usually means the container is already gone
        match &result {
            Ok(()) => tracing::debug!(id, "container removed"),
            Err(e) => tracing::warn!(id, error = %e, "remove failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
