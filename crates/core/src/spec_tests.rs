// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const HOST: &str = "https://github.com";

#[test]
fn short_form_expands_against_default_host() {
    let spec = RepoSpec::parse("binder-examples/requirements", HOST, "master").unwrap();
    assert_eq!(spec.url, "https://github.com/binder-examples/requirements");
    assert_eq!(spec.git_ref, "master");
}

#[test]
fn explicit_ref_is_split_off() {
    let spec = RepoSpec::parse(
        "https://github.com/binder-examples/requirements@11cdea0",
        HOST,
        "master",
    )
    .unwrap();
    assert_eq!(spec.url, "https://github.com/binder-examples/requirements");
    assert_eq!(spec.git_ref, "11cdea0");
}

#[test]
fn ref_may_contain_slashes() {
    let spec = RepoSpec::parse("org/repo@feature/thing", HOST, "master").unwrap();
    assert_eq!(spec.url, "https://github.com/org/repo");
    assert_eq!(spec.git_ref, "feature/thing");
}

#[test]
fn host_form_keeps_its_own_host() {
    let spec = RepoSpec::parse("gitlab.com/org/repo@v1", HOST, "master").unwrap();
    assert_eq!(spec.url, "https://gitlab.com/org/repo");
    assert_eq!(spec.git_ref, "v1");

    let spec = RepoSpec::parse("github.com/org/repo", HOST, "master").unwrap();
    assert_eq!(spec.url, "https://github.com/org/repo");
    assert_eq!(spec.git_ref, "master");
}

#[test]
fn host_with_port_is_recognized() {
    let spec = RepoSpec::parse("localhost:3000/team/repo", HOST, "main").unwrap();
    assert_eq!(spec.url, "https://localhost:3000/team/repo");
}

#[test]
fn dotted_org_in_short_form_is_not_a_host() {
    let spec = RepoSpec::parse("my.org/repo", HOST, "master").unwrap();
    assert_eq!(spec.url, "https://github.com/my.org/repo");
}

#[test]
fn userinfo_is_not_mistaken_for_ref() {
    let spec = RepoSpec::parse("https://bot@example.org/org/repo", HOST, "main").unwrap();
    assert_eq!(spec.url, "https://bot@example.org/org/repo");
    assert_eq!(spec.git_ref, "main");
}

#[test]
fn file_urls_are_accepted() {
    let spec = RepoSpec::parse("file:///srv/repos/demo@v1", HOST, "master").unwrap();
    assert_eq!(spec.url, "file:///srv/repos/demo");
    assert_eq!(spec.git_ref, "v1");
}

#[test]
fn empty_token_is_rejected() {
    assert_eq!(RepoSpec::parse("  ", HOST, "master"), Err(SpecError::Empty));
}

#[test]
fn empty_ref_is_rejected() {
    assert!(matches!(
        RepoSpec::parse("org/repo@", HOST, "master"),
        Err(SpecError::EmptyRef(_))
    ));
}

#[test]
fn url_without_path_is_rejected() {
    assert!(matches!(
        RepoSpec::parse("https://github.com", HOST, "master"),
        Err(SpecError::MissingPath(_))
    ));
}

#[test]
fn display_joins_url_and_ref() {
    let spec = RepoSpec::new("https://github.com/org/repo", "main");
    assert_eq!(spec.to_string(), "https://github.com/org/repo@main");
}
