// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistent run artifacts: result ledgers, summaries and the run directory layout

mod csv;
pub mod ledger;
pub mod migrate;
pub mod summary;

pub use ledger::{LedgerError, ResultLedger};
pub use migrate::{migrate_layout, MigrateError, Migration, Move, Skip, SkipReason};
pub use summary::RepoSummary;
