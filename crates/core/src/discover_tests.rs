// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn sorted(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = find_notebooks(root).collect();
    found.sort();
    found
}

#[test]
fn finds_notebooks_and_skips_checkpoints() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    for rel in [
        "a.ipynb",
        "subdir/b.ipynb",
        "subdir/a.txt",
        ".ipynb_checkpoints/c.ipynb",
    ] {
        touch(root, rel);
    }

    assert_eq!(
        sorted(root),
        vec![PathBuf::from("a.ipynb"), PathBuf::from("subdir/b.ipynb")]
    );
}

#[test]
fn skips_nested_checkpoint_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "x/y/z/deep.ipynb");
    touch(root, "x/y/.ipynb_checkpoints/deep-checkpoint.ipynb");
    touch(root, "x/.ipynb_checkpoints/more/inner.ipynb");

    assert_eq!(sorted(root), vec![PathBuf::from("x/y/z/deep.ipynb")]);
}

#[test]
fn extension_must_be_a_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "notes.ipynb.bak");
    touch(root, "real.ipynb");

    assert_eq!(sorted(root), vec![PathBuf::from("real.ipynb")]);
}

#[test]
fn each_call_walks_again() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "one.ipynb");
    assert_eq!(find_notebooks(root).count(), 1);

    touch(root, "two.ipynb");
    assert_eq!(find_notebooks(root).count(), 2);
}

#[test]
fn missing_root_yields_nothing() {
    assert_eq!(find_notebooks(Path::new("/nonexistent/checkout")).count(), 0);
}
