// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;

fn fixed() -> FakeClock {
    FakeClock::at(Local.with_ymd_and_hms(2020, 7, 1, 14, 23, 17).unwrap())
}

#[test]
fn run_id_uses_minute_resolution() {
    assert_eq!(fixed().run_id(), "2020-07-01T14.23");
}

#[test]
fn timestamp_has_microseconds() {
    assert_eq!(fixed().timestamp(), "2020-07-01T14:23:17.000000");
}

#[test]
fn fake_clock_stays_frozen() {
    let clock = fixed();
    let first = clock.timestamp();
    assert_eq!(clock.clone().timestamp(), first);
}

#[test]
fn system_clock_run_id_is_stable_within_a_minute() {
    let id = SystemClock.run_id();
    assert_eq!(id.len(), "2020-07-01T14.23".len());
    assert!(id.contains('T'));
}
