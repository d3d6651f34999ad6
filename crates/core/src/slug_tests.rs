// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::Path;

#[test]
fn slug_strips_scheme_and_git_suffix() {
    assert_eq!(
        repo_slug("https://github.com/binder-examples/requirements.git"),
        "github.com/binder-examples/requirements"
    );
}

#[test]
fn slug_drops_userinfo_and_port() {
    assert_eq!(
        repo_slug("https://user@GitLab.example.org:8443/Group/Proj"),
        "gitlab.example.org/Group/Proj"
    );
}

#[test]
fn slug_without_host_uses_localhost() {
    assert_eq!(repo_slug("file:///srv/repos/demo"), "localhost/srv/repos/demo");
}

#[test]
fn image_id_is_deterministic() {
    let url = "https://github.com/Org/Repo";
    assert_eq!(image_id("r2d-test-", url, "abc123"), image_id("r2d-test-", url, "abc123"));
    assert_eq!(
        image_id("r2d-test-", url, "abc123"),
        "r2d-test-github.com-org-repo:abc123"
    );
}

#[test]
fn image_id_ref_only_changes_tag() {
    let url = "https://github.com/org/repo";
    let a = image_id("r2d-test-", url, "aaa");
    let b = image_id("r2d-test-", url, "bbb");
    let (name_a, tag_a) = a.split_once(':').unwrap();
    let (name_b, tag_b) = b.split_once(':').unwrap();
    assert_eq!(name_a, name_b);
    assert_ne!(tag_a, tag_b);
}

#[test]
fn image_id_sanitizes_symbolic_ref() {
    let id = image_id("r2d-test-", "https://github.com/org/repo", "feature/x");
    assert!(id.ends_with(":feature-x"), "{id}");
}

#[test]
fn run_path_inserts_org_initial() {
    assert_eq!(
        repo_run_path("https://github.com/Binder-Examples/Requirements"),
        Path::new("github.com/b/binder-examples/requirements")
    );
}

#[test]
fn run_path_for_bare_host() {
    assert_eq!(repo_run_path("https://example.org"), Path::new("example.org"));
}

#[test]
fn path_safe_replaces_separators() {
    assert_eq!(path_safe("dir/sub/nb.ipynb"), "dir-sub-nb.ipynb");
}
