// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `r2dc [OPTIONS] <REPOS>...` - build and test repositories

use crate::adapters;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use r2dc_core::{CheckerConfig, Clock, FileConfig, RepoSpec, SystemClock, RUN_ID_ENV};
use r2dc_engine::Checker;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Repositories to test: org/repo, host/org/repo or a URL, optionally @ref
    #[arg(value_name = "REPOS", required = true)]
    pub repos: Vec<String>,

    /// Directory for logs, results and notebooks [default: ./runs]
    #[arg(long)]
    pub run_dir: Option<PathBuf>,

    /// Do not echo build and test output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum notebooks tested per repository, 0 for all [default: 5]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Rebuild images that already exist
    #[arg(long)]
    pub force_build: bool,

    /// TOML file with run settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ref used for repositories given without @ref [default: master]
    #[arg(long, value_name = "REF")]
    pub default_ref: Option<String>,

    /// Per-notebook execution timeout in seconds [default: 600]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// In-container driver binary [default: r2dc-inrepo next to r2dc]
    #[arg(long, value_name = "PATH")]
    pub driver: Option<PathBuf>,
}

pub async fn check(args: CheckArgs) -> Result<()> {
    let config = resolve_config(
        &args,
        &SystemClock,
        std::env::var(RUN_ID_ENV).ok(),
        adapters::bundled_driver(),
    )?;
    let specs = parse_repos(&args.repos, &config)?;

    if !config.driver_path.is_file() {
        tracing::warn!(
            path = %config.driver_path.display(),
            "driver binary not found, notebook tests will fail"
        );
    }
    tracing::info!(
        run_id = %config.run_id,
        run_dir = %config.run_dir.display(),
        repos = specs.len(),
        "starting run"
    );

    let checker = Checker::new(adapters::real_deps(&config), &config);
    checker
        .check_all(&specs, |report| {
            if let Some(summary) = report.summary(&config.run_dir) {
                print!("{summary}");
            }
        })
        .await;
    Ok(())
}

/// Layer defaults, the config file, `RUN_ID` and flags, lowest first
pub fn resolve_config(
    args: &CheckArgs,
    clock: &impl Clock,
    run_id: Option<String>,
    bundled_driver: Option<PathBuf>,
) -> Result<CheckerConfig, CliError> {
    let mut config = CheckerConfig::new(clock);
    if let Some(driver) = bundled_driver {
        config.driver_path = driver;
    }
    if let Some(path) = &args.config {
        let file = FileConfig::load(path).map_err(|e| CliError::bad_config(path, e))?;
        config.apply(file);
    }
    let mut config = config.with_run_id(run_id);

    if let Some(dir) = &args.run_dir {
        config.run_dir = dir.clone();
    }
    if let Some(limit) = args.limit {
        config.notebook_limit = limit;
    }
    if let Some(timeout) = args.timeout {
        config.notebook_timeout_secs = timeout;
    }
    if let Some(default_ref) = &args.default_ref {
        config.default_ref = default_ref.clone();
    }
    if let Some(driver) = &args.driver {
        config.driver_path = driver.clone();
    }
    config.quiet = args.quiet;
    config.force_build = args.force_build;
    Ok(config)
}

/// Parse every token up front so a typo fails before any work starts
pub fn parse_repos(tokens: &[String], config: &CheckerConfig) -> Result<Vec<RepoSpec>, CliError> {
    tokens
        .iter()
        .map(|token| {
            RepoSpec::parse(token, &config.default_host, &config.default_ref)
                .map_err(|e| CliError::invalid_repo(token, e))
        })
        .collect()
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
