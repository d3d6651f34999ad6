// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Migration of run directories from `{host}/{Org}/{Repo}` to
//! `{host}/{o}/{org}/{repo}`, rewriting log paths in the moved ledgers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directories that only ever appear inside a repository run directory
const RUN_SUBDIRS: [&str; 3] = ["results", "logs", "notebooks"];

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot move {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot rewrite {}: {source}", path.display())]
    Rewrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A repository directory that was moved
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub from: PathBuf,
    pub to: PathBuf,
    /// Result files whose log paths were rewritten
    pub rewritten: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Single-character org directory, already in the new layout
    AlreadyMigrated,
    /// Org directory holds run artifacts directly, not repositories
    ResultsOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything a migration did
#[derive(Debug, Default)]
pub struct Migration {
    pub moves: Vec<Move>,
    pub skipped: Vec<Skip>,
}

/// Migrate every host directory under `run_dir`.
///
/// Plain files are ignored at every level. Running it twice is harmless:
/// the second pass only sees single-character orgs.
pub fn migrate_layout(run_dir: &Path) -> Result<Migration, MigrateError> {
    let mut migration = Migration::default();

    for host in list_dirs(run_dir)? {
        let host_path = run_dir.join(&host);
        for org in list_dirs(&host_path)? {
            let org_path = host_path.join(&org);
            if org.chars().count() == 1 {
                tracing::info!(path = %org_path.display(), "already processed");
                migration.skipped.push(Skip {
                    path: org_path,
                    reason: SkipReason::AlreadyMigrated,
                });
                continue;
            }

            let entries = list_names(&org_path)?;
            if entries.iter().all(|e| RUN_SUBDIRS.contains(&e.as_str())) {
                tracing::info!(path = %org_path.display(), "just results");
                migration.skipped.push(Skip {
                    path: org_path,
                    reason: SkipReason::ResultsOnly,
                });
                continue;
            }

            for repo in entries {
                if !org_path.join(&repo).is_dir() {
                    continue;
                }
                migration
                    .moves
                    .push(move_repo(run_dir, &host, &org, &repo)?);
            }
        }
    }

    Ok(migration)
}

fn move_repo(run_dir: &Path, host: &str, org: &str, repo: &str) -> Result<Move, MigrateError> {
    let old_slug = Path::new(host).join(org).join(repo);
    let initial: String = org.chars().take(1).collect();
    let new_slug = PathBuf::from(
        Path::new(host)
            .join(initial)
            .join(org)
            .join(repo)
            .to_string_lossy()
            .to_lowercase(),
    );

    let from = run_dir.join(&old_slug);
    let to = run_dir.join(&new_slug);
    let move_err = |source| MigrateError::Move {
        from: from.clone(),
        to: to.clone(),
        source,
    };

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(move_err)?;
    }
    tracing::info!(from = %from.display(), to = %to.display(), "moving");
    fs::rename(&from, &to).map_err(move_err)?;

    let old_logs = old_slug.join("logs").to_string_lossy().into_owned();
    let new_logs = new_slug.join("logs").to_string_lossy().into_owned();
    let rewritten = rewrite_log_paths(&to.join("results"), &old_logs, &new_logs)?;

    Ok(Move {
        from,
        to,
        rewritten,
    })
}

fn rewrite_log_paths(results_dir: &Path, old: &str, new: &str) -> Result<Vec<PathBuf>, MigrateError> {
    let mut rewritten = Vec::new();
    if !results_dir.is_dir() {
        return Ok(rewritten);
    }

    for name in list_names(results_dir)? {
        let path = results_dir.join(name);
        if !path.is_file() {
            continue;
        }
        let rewrite_err = |source| MigrateError::Rewrite {
            path: path.clone(),
            source,
        };
        let before = fs::read_to_string(&path).map_err(rewrite_err)?;
        let after = before.replace(old, new);
        if after != before {
            tracing::info!(path = %path.display(), old, new, "rewriting log paths");
            fs::write(&path, after).map_err(rewrite_err)?;
            rewritten.push(path);
        }
    }

    rewritten.sort();
    Ok(rewritten)
}

/// Sorted names of the entries in `dir`
fn list_names(dir: &Path) -> Result<Vec<String>, MigrateError> {
    let read_err = |source| MigrateError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn list_dirs(dir: &Path) -> Result<Vec<String>, MigrateError> {
    Ok(list_names(dir)?
        .into_iter()
        .filter(|name| dir.join(name).is_dir())
        .collect())
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
