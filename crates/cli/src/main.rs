// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! r2dc - build repositories with repo2docker and test their notebooks

mod adapters;
mod commands;
mod error;

use clap::{Parser, Subcommand};
use commands::{check, migrate};
use error::CliError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "r2dc",
    version,
    about = "Build repositories with repo2docker and test their notebooks",
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    check: check::CheckArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Move run directories from {host}/{Org}/{Repo} to {host}/{o}/{org}/{repo}
    MigrateLayout(migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let result = match cli.command {
        Some(Commands::MigrateLayout(args)) => migrate::migrate(args),
        None => check::check(cli.check).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CliError>() {
                Some(cli_err) => eprint!("{cli_err}"),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
