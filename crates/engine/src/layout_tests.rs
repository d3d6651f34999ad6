// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use r2dc_core::FakeClock;

fn config(run_dir: &Path) -> CheckerConfig {
    let mut config = CheckerConfig::new(&FakeClock::new()).with_run_id(Some("r1".to_string()));
    config.run_dir = run_dir.to_path_buf();
    config
}

#[test]
fn layout_follows_lowercased_initial_scheme() {
    let config = config(Path::new("runs"));
    let layout = RepoLayout::new(&config, &RepoSpec::new("https://github.com/Org/Repo", "main"));

    assert_eq!(layout.repo_dir, Path::new("runs/github.com/o/org/repo"));
    assert_eq!(
        layout.build_log,
        Path::new("runs/github.com/o/org/repo/logs/build-main-r1.txt")
    );
    assert_eq!(
        layout.result_file,
        Path::new("runs/github.com/o/org/repo/results/results-main-r1.csv")
    );
}

#[test]
fn refs_and_notebook_paths_become_single_components() {
    let config = config(Path::new("runs"));
    let layout = RepoLayout::new(
        &config,
        &RepoSpec::new("https://github.com/org/repo", "feature/x"),
    );

    assert!(layout.build_log.ends_with("build-feature-x-r1.txt"));
    assert!(layout
        .test_log(TestKind::Notebook, "sub/dir/b.ipynb")
        .ends_with("logs/test-notebook-sub-dir-b.ipynb-r1.txt"));
}

#[test]
fn relative_strips_run_dir() {
    let config = config(Path::new("runs"));
    let layout = RepoLayout::new(&config, &RepoSpec::new("https://github.com/org/repo", "main"));

    assert_eq!(
        layout.relative(&layout.build_log),
        "github.com/o/org/repo/logs/build-main-r1.txt"
    );
}

#[test]
fn prepare_creates_logs_and_results() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(dir.path());
    let layout = RepoLayout::new(&config, &RepoSpec::new("https://github.com/org/repo", "main"));

    layout.prepare().unwrap();
    layout.prepare().unwrap();

    assert!(layout.logs_dir.is_dir());
    assert!(layout.results_dir.is_dir());
}

#[test]
fn unique_test_log_suffixes_taken_names() {
    let config = config(Path::new("runs"));
    let layout = RepoLayout::new(&config, &RepoSpec::new("https://github.com/org/repo", "main"));
    let mut taken = HashSet::new();

    let first = layout.unique_test_log(TestKind::Notebook, "a/b.ipynb", &taken);
    assert_eq!(first, layout.test_log(TestKind::Notebook, "a/b.ipynb"));
    taken.insert(first);

    let second = layout.unique_test_log(TestKind::Notebook, "a-b.ipynb", &taken);
    assert!(second.ends_with("logs/test-notebook-a-b.ipynb.2-r1.txt"));
    taken.insert(second);

    let third = layout.unique_test_log(TestKind::Notebook, "a-b.ipynb", &taken);
    assert!(third.ends_with("logs/test-notebook-a-b.ipynb.3-r1.txt"));
}
