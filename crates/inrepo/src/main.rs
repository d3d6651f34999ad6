// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! r2dc-inrepo - run one test inside a built image
//!
//! Exits 0 when the test passes and non-zero otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use r2dc_inrepo::{Driver, DriverConfig, JupyterCli, TestType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "r2dc-inrepo", version, about = "Run a single test inside a repo2docker image")]
struct Args {
    /// Directory to store test results
    #[arg(long, default_value_os_t = std::env::temp_dir())]
    output_dir: PathBuf,

    /// Per-notebook execution timeout in seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,

    /// Python interpreter used for import tests
    #[arg(long, default_value = "python3")]
    python: String,

    /// Jupyter executable used for notebooks
    #[arg(long, default_value = "jupyter")]
    jupyter: String,

    /// Kind of test
    #[arg(value_enum)]
    test_type: TestType,

    /// Module name or notebook path
    test: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    let config = DriverConfig {
        output_dir: args.output_dir,
        timeout_secs: args.timeout,
        cwd: std::env::current_dir().context("cannot determine working directory")?,
    };
    let driver = Driver::new(JupyterCli::new(args.python, args.jupyter), config);

    driver
        .run(args.test_type, &args.test)
        .await
        .with_context(|| format!("{} test {} failed", args.test_type, args.test))
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
