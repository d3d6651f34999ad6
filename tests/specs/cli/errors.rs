//! Argument and configuration error specs
//!
//! These are the only failures reflected in the exit status.

use crate::prelude::*;

#[test]
fn no_repositories_is_a_usage_error() {
    let temp = Project::empty();
    temp.r2dc().exits(2).stderr_has("<REPOS>");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["--colour", "org/repo"])
        .exits(2)
        .stderr_has("--colour");
}

#[test]
fn repository_with_empty_ref_is_rejected() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["org/repo@"])
        .exits(1)
        .stderr_has("error: invalid repository 'org/repo@'")
        .stderr_has("suggestions:");
    assert!(!temp.path().join("runs").exists());
}

#[test]
fn missing_config_file_is_rejected() {
    let temp = Project::empty();
    temp.r2dc()
        .args(&["--config", "absent.toml", "org/repo"])
        .exits(1)
        .stderr_has("cannot load configuration absent.toml");
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = Project::empty();
    temp.file("r2dc.toml", "notebook_limit = 3\ncolour = \"blue\"\n");
    temp.r2dc()
        .args(&["--config", "r2dc.toml", "org/repo"])
        .exits(1)
        .stderr_has("Allowed keys");
}
