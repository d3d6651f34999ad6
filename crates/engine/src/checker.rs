// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-repository check: fetch, build or reuse the image, run the tests,
//! record every outcome.

use crate::error::CheckError;
use crate::layout::RepoLayout;
use r2dc_adapters::{BuildAdapter, ContainerAdapter, LogTee, RepoAdapter};
use r2dc_core::{image_id, repo_slug, CheckerConfig, RepoSpec, TestKind, TestResult};
use r2dc_storage::{RepoSummary, ResultLedger};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::Instrument;

/// Recorded version when the build tool cannot report one
pub const UNKNOWN_VERSION: &str = "unknown";

/// Adapter dependencies of a checker
pub struct CheckerDeps<R, B, C> {
    pub repos: R,
    pub builder: B,
    pub containers: C,
}

/// A fetched repository snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub path: PathBuf,
    pub resolved_ref: String,
    /// Commit date of HEAD, strict ISO-8601
    pub last_modified: String,
}

/// Everything recorded for one repository
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub spec: RepoSpec,
    pub result_file: PathBuf,
    pub results: Vec<TestResult>,
}

impl RepoReport {
    pub fn summary(&self, run_dir: &Path) -> Option<RepoSummary> {
        RepoSummary::new(self.results.clone(), &self.result_file, run_dir)
    }
}

/// Checks repositories one at a time
pub struct Checker<'a, R, B, C> {
    pub(crate) repos: R,
    pub(crate) builder: B,
    pub(crate) containers: C,
    pub(crate) config: &'a CheckerConfig,
    checkout_root: PathBuf,
    tool_version: OnceCell<String>,
}

impl<'a, R, B, C> Checker<'a, R, B, C>
where
    R: RepoAdapter,
    B: BuildAdapter,
    C: ContainerAdapter,
{
    pub fn new(deps: CheckerDeps<R, B, C>, config: &'a CheckerConfig) -> Self {
        Self {
            repos: deps.repos,
            builder: deps.builder,
            containers: deps.containers,
            config,
            checkout_root: std::env::temp_dir(),
            tool_version: OnceCell::new(),
        }
    }

    /// Directory under which fresh checkouts are created
    pub fn with_checkout_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.checkout_root = root.into();
        self
    }

    /// Check every repository in order, handing each report to `on_report`.
    ///
    /// A repository that aborts is logged and skipped; the batch continues.
    pub async fn check_all<F>(&self, specs: &[RepoSpec], mut on_report: F) -> Vec<RepoReport>
    where
        F: FnMut(&RepoReport),
    {
        let mut reports = Vec::with_capacity(specs.len());
        for spec in specs {
            match self.check_repo(spec).await {
                Ok(report) => {
                    on_report(&report);
                    reports.push(report);
                }
                Err(e) => tracing::error!(repo = %spec, error = %e, "error checking repository"),
            }
        }
        reports
    }

    /// Check a single repository.
    ///
    /// Fetch and build failures are recorded as a failed build result;
    /// only local infrastructure errors are returned.
    pub async fn check_repo(&self, spec: &RepoSpec) -> Result<RepoReport, CheckError> {
        let span = tracing::info_span!("check", repo = %spec);
        self.check_repo_inner(spec).instrument(span).await
    }

    async fn check_repo_inner(&self, spec: &RepoSpec) -> Result<RepoReport, CheckError> {
        let layout = RepoLayout::new(self.config, spec);
        layout
            .prepare()
            .map_err(CheckError::io(&layout.repo_dir))?;
        let ledger = ResultLedger::create(&layout.result_file)?;
        let mut recorder = Recorder {
            ledger,
            results: Vec::new(),
            spec,
            resolved_ref: spec.git_ref.clone(),
            last_modified: String::new(),
            tool_version: self.tool_version().await,
            layout: &layout,
            config: self.config,
        };

        let checkout = match self.fetch(spec).await {
            Ok(checkout) => checkout,
            Err(e) if e.is_infrastructure() => return Err(e),
            Err(e) => {
                tracing::error!(error = %e, "fetch failed");
                append_to_log(&layout.build_log, &e)?;
                recorder.record(TestKind::Build, "build", false, &layout.build_log)?;
                return Ok(recorder.finish());
            }
        };
        recorder.resolved_ref = checkout.resolved_ref.clone();
        recorder.last_modified = checkout.last_modified.clone();

        tracing::info!(
            dir = %layout.repo_dir.display(),
            run_id = %self.config.run_id,
            "building"
        );
        let built = self
            .build_image(&spec.url, &checkout.resolved_ref, &checkout.path, &layout.build_log)
            .await;
        let image = match built {
            Ok(image) => {
                recorder.record(TestKind::Build, "build", true, &layout.build_log)?;
                image
            }
            Err(e) if e.is_infrastructure() => return Err(e),
            Err(e) => {
                tracing::error!(error = %e, "build failed");
                if !e.is_tool_failure() {
                    append_to_log(&layout.build_log, &e)?;
                }
                recorder.record(TestKind::Build, "build", false, &layout.build_log)?;
                return Ok(recorder.finish());
            }
        };

        for outcome in self.run_tests(&image, &checkout.path, &layout).await? {
            recorder.record(
                outcome.kind,
                &outcome.test_id,
                outcome.success,
                &outcome.log_path,
            )?;
        }

        Ok(recorder.finish())
    }

    /// Clone the repository into a fresh temporary directory
    pub async fn fetch(&self, spec: &RepoSpec) -> Result<Checkout, CheckError> {
        let root = self.checkout_root.join(format!(
            "r2d-test-{}-{}",
            self.config.run_id,
            uuid::Uuid::new_v4().simple()
        ));
        std::fs::create_dir_all(&root).map_err(CheckError::io(&root))?;
        let path = root.join(repo_slug(&spec.url));

        tracing::info!(repo = %spec, path = %path.display(), "cloning");
        let progress = LogTee::console(!self.config.quiet);
        let cloned = self
            .repos
            .clone_at(&spec.url, &spec.git_ref, &path, &progress)
            .await;
        if let Err(e) = progress.finish().await {
            tracing::debug!(error = %e, "console progress ended early");
        }
        cloned?;

        let resolved_ref = match self.repos.resolve_head(&path).await {
            Ok(commit) => commit,
            Err(e) => {
                tracing::warn!(error = %e, git_ref = %spec.git_ref, "failed to resolve ref, using it as-is");
                spec.git_ref.clone()
            }
        };
        let last_modified = self.repos.last_modified(&path).await?;

        Ok(Checkout {
            path,
            resolved_ref,
            last_modified,
        })
    }

    /// Build the image for a checkout, or reuse an existing one.
    ///
    /// The build log is always flushed before this returns.
    pub async fn build_image(
        &self,
        url: &str,
        resolved_ref: &str,
        checkout: &Path,
        log_path: &Path,
    ) -> Result<String, CheckError> {
        let image = image_id(&self.config.image_prefix, url, resolved_ref);
        let log = LogTee::create(log_path, !self.config.quiet).map_err(CheckError::io(log_path))?;

        let built = self.build_into(&image, checkout, &log).await;
        let flushed = log.finish().await.map_err(CheckError::io(log_path));
        built?;
        flushed?;
        Ok(image)
    }

    async fn build_into(&self, image: &str, checkout: &Path, log: &LogTee) -> Result<(), CheckError> {
        if !self.config.force_build && self.containers.image_exists(image).await? {
            tracing::info!(image, "image already built");
            log.write_str(&format!("Image {} already built\n", image))
                .await
                .map_err(CheckError::io(log.path().unwrap_or(Path::new(""))))?;
            return Ok(());
        }
        self.builder.build(checkout, image, log).await?;
        Ok(())
    }

    /// Build tool version, queried once per checker
    async fn tool_version(&self) -> String {
        self.tool_version
            .get_or_init(|| async {
                match self.builder.version().await {
                    Ok(version) => version,
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot determine build tool version");
                        UNKNOWN_VERSION.to_string()
                    }
                }
            })
            .await
            .clone()
    }
}

/// Appends results to the ledger, stamping each with the run identity
struct Recorder<'r> {
    ledger: ResultLedger,
    results: Vec<TestResult>,
    spec: &'r RepoSpec,
    resolved_ref: String,
    last_modified: String,
    tool_version: String,
    layout: &'r RepoLayout,
    config: &'r CheckerConfig,
}

impl Recorder<'_> {
    fn record(
        &mut self,
        kind: TestKind,
        test_id: &str,
        success: bool,
        log_path: &Path,
    ) -> Result<(), CheckError> {
        tracing::info!(
            %kind,
            test_id,
            "recording test result: {}",
            if success { "success" } else { "failure" }
        );
        let result = TestResult {
            repo: self.spec.url.clone(),
            git_ref: self.spec.git_ref.clone(),
            resolved_ref: self.resolved_ref.clone(),
            last_modified: self.last_modified.clone(),
            kind,
            test_id: test_id.to_string(),
            success,
            path: self.layout.relative(log_path),
            timestamp: self.config.timestamp.clone(),
            run_id: self.config.run_id.clone(),
            repo2docker_version: self.tool_version.clone(),
        };
        self.ledger.append(&result)?;
        self.results.push(result);
        Ok(())
    }

    fn finish(self) -> RepoReport {
        RepoReport {
            spec: self.spec.clone(),
            result_file: self.ledger.path().to_path_buf(),
            results: self.results,
        }
    }
}

/// Append an error that the failing tool did not write itself
fn append_to_log(path: &Path, error: &CheckError) -> Result<(), CheckError> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(CheckError::io(path))?;
    writeln!(file, "{}", error).map_err(CheckError::io(path))
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
