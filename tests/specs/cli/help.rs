//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_run_options() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["--help"])
        .passes()
        .stdout_has("<REPOS>...")
        .stdout_has("--run-dir")
        .stdout_has("--force-build")
        .stdout_has("--quiet")
        .stdout_has("--limit")
        .stdout_has("migrate-layout");
}

#[test]
fn migrate_layout_help_names_run_dir() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["migrate-layout", "--help"])
        .passes()
        .stdout_has("[RUN_DIR]")
        .stdout_lacks("--force-build");
}

#[test]
fn version_is_printed() {
    let temp = Project::empty();
    temp.r2dc().args(&["--version"]).passes().stdout_has("r2dc ");
}
