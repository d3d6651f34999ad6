// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable run identity

use chrono::{DateTime, Local};

/// A clock that provides the current wall-clock time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Run identifier derived from the current time, e.g. `2020-07-01T14.23`
    fn run_id(&self) -> String {
        self.now().format("%Y-%m-%dT%H.%M").to_string()
    }

    /// Run timestamp stored in every result record
    fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fake clock for testing, frozen at one instant
#[derive(Clone)]
pub struct FakeClock {
    current: DateTime<Local>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Create a clock frozen at the given time
    pub fn at(time: DateTime<Local>) -> Self {
        Self { current: time }
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Local> {
        self.current
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
