// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `r2dc migrate-layout` - move legacy run directories into the sharded layout

use crate::error::CliError;
use anyhow::{Context, Result};
use clap::Args;
use r2dc_core::config::DEFAULT_RUN_DIR;
use r2dc_storage::{migrate_layout, Migration, SkipReason};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Run directory to migrate
    #[arg(default_value = DEFAULT_RUN_DIR)]
    pub run_dir: PathBuf,
}

pub fn migrate(args: MigrateArgs) -> Result<()> {
    if !args.run_dir.is_dir() {
        return Err(CliError::missing_run_dir(&args.run_dir).into());
    }
    let migration = migrate_layout(&args.run_dir)
        .with_context(|| format!("migrating {}", args.run_dir.display()))?;
    print!("{}", report(&migration));
    Ok(())
}

fn report(migration: &Migration) -> String {
    let mut out = String::new();
    for m in &migration.moves {
        let _ = writeln!(out, "moved {} -> {}", m.from.display(), m.to.display());
        for file in &m.rewritten {
            let _ = writeln!(out, "  rewrote {}", file.display());
        }
    }
    for skip in &migration.skipped {
        let why = match skip.reason {
            SkipReason::AlreadyMigrated => "already migrated",
            SkipReason::ResultsOnly => "holds results, not repositories",
        };
        let _ = writeln!(out, "skipped {} ({why})", skip.path.display());
    }
    let _ = writeln!(
        out,
        "{} moved, {} skipped",
        migration.moves.len(),
        migration.skipped.len()
    );
    out
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
