//! Specs for repositories that cannot be fetched
//!
//! A fetch failure is recorded as a failed build and never fails the process.

use crate::prelude::*;

#[test]
fn unreachable_repository_is_reported_as_failed_build() {
    let temp = Project::empty();
    let missing = temp.path().join("no-such-repo");
    let url = format!("file://{}", missing.display());

    temp.r2dc()
        .args(&["-q", "--run-dir", "runs", &url])
        .env("RUN_ID", "spec1")
        .passes()
        .stdout_has(&format!("Result summary for {url}@master-master:"))
        .stdout_has("results-master-spec1.csv")
        .stdout_has("Build failed, see runs/")
        .stdout_lacks("OK!");
}

#[test]
fn one_bad_repository_does_not_stop_the_batch() {
    let temp = Project::empty();
    let first = format!("file://{}", temp.path().join("first").display());
    let second = format!("file://{}", temp.path().join("second").display());

    let run = temp
        .r2dc()
        .args(&["-q", "--run-dir", "runs", &first, &second])
        .env("RUN_ID", "spec2")
        .passes();

    let stdout = run.stdout();
    assert_eq!(stdout.matches("Result summary for").count(), 2);
    assert_eq!(stdout.matches("Build failed").count(), 2);
}
