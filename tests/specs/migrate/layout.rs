//! Layout migration specs

use crate::prelude::*;

#[test]
fn legacy_repository_is_moved_and_rewritten() {
    let temp = Project::empty();
    temp.file("runs/github.com/Org/Repo/logs/build-master-r1.txt", "built\n");
    temp.file(
        "runs/github.com/Org/Repo/results/results-master-r1.csv",
        "repo,path\nhttps://github.com/Org/Repo,github.com/Org/Repo/logs/build-master-r1.txt\n",
    );

    temp.r2dc()
        .args(&["migrate-layout"])
        .passes()
        .stdout_has("moved ./runs/github.com/Org/Repo -> ./runs/github.com/o/org/repo")
        .stdout_has("1 moved, 0 skipped");

    let ledger = temp
        .path()
        .join("runs/github.com/o/org/repo/results/results-master-r1.csv");
    let content = std::fs::read_to_string(ledger).unwrap();
    assert!(content.contains(",github.com/o/org/repo/logs/build-master-r1.txt"));
}

#[test]
fn second_migration_moves_nothing() {
    let temp = Project::empty();
    temp.file("old/gitlab.com/Team/Proj/logs/x.txt", "");

    temp.r2dc().args(&["migrate-layout", "old"]).passes();
    temp.r2dc()
        .args(&["migrate-layout", "old"])
        .passes()
        .stdout_has("(already migrated)")
        .stdout_has("0 moved");
}

#[test]
fn missing_run_directory_fails() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["migrate-layout", "nowhere"])
        .fails()
        .stderr_has("run directory nowhere does not exist");
}
