// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! In-container test driver.
//!
//! Runs inside a built image with the host's run directory mounted, and
//! performs exactly one test: importing a module or executing a notebook.
//! The exit status is the verdict.

pub mod driver;
pub mod error;
pub mod jupyter;
pub mod kernel;
pub mod notebook;

pub use driver::{Driver, DriverConfig, TestType};
pub use error::DriverError;
pub use jupyter::{ExecuteRequest, Jupyter, JupyterCli};
pub use kernel::{resolve_kernel, KernelChoice, KernelSpecs};
pub use notebook::{CellError, DeclaredKernel};

#[cfg(test)]
pub use jupyter::{FakeJupyter, JupyterCall};
