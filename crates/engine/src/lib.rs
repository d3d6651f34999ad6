// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Checking engine: drives fetch, build, discovery and test runs for each
//! repository and records the results

mod checker;
mod error;
mod layout;
mod runner;

pub use checker::{Checker, CheckerDeps, Checkout, RepoReport, UNKNOWN_VERSION};
pub use error::CheckError;
pub use layout::RepoLayout;
pub use runner::{TestOutcome, DRIVER_MOUNT, OUTPUT_MOUNT};
