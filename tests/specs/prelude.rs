//! Shared helpers for black-box CLI specs.
//!
//! Specs run the built `r2dc` binary inside a scratch project directory and
//! assert on exit status, stdout and stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Path to a workspace binary next to the spec executable
fn binary(name: &str) -> PathBuf {
    let exe = std::env::current_exe().unwrap();
    // target/{profile}/deps/specs-<hash> -> target/{profile}/{name}
    let dir = exe.parent().and_then(Path::parent).unwrap();
    let path = dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX));
    assert!(
        path.is_file(),
        "{} not built; run the specs with `cargo test --workspace`",
        path.display()
    );
    path
}

/// Scratch directory the CLI runs in
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parents
    pub fn file(&self, rel: &str, contents: &str) {
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    pub fn r2dc(&self) -> CliBuilder {
        let mut cmd = Command::new(binary("r2dc"));
        cmd.current_dir(self.path())
            .env("RUST_LOG", "warn")
            .env_remove("RUN_ID");
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit status 0
    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().failure(),
        }
    }

    /// Run and require a specific exit status
    pub fn exits(mut self, code: i32) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().code(code),
        }
    }
}

pub struct RunAssert {
    assert: assert_cmd::assert::Assert,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }
}
