//! Shared fixtures for CLI specs

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use predicates::prelude::*;

/// Temporary journal directory the CLI is pointed at through `MJ_DIR`.
pub struct Storage {
    tmp: TempDir,
}

impl Storage {
    pub fn empty() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    pub fn dir(&self) -> PathBuf {
        self.tmp.path().join("journal")
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::create_dir_all(self.dir()).unwrap();
        std::fs::write(self.dir().join(name), content).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir().join(name)).unwrap()
    }

    pub fn mj(&self) -> Mj {
        let mut cmd = Command::cargo_bin("mj").unwrap();
        cmd.env("MJ_DIR", self.dir()).env_remove("RUST_LOG");
        Mj { cmd }
    }
}

pub struct Mj {
    cmd: Command,
}

impl Mj {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> Outcome {
        Outcome {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn fails(mut self) -> Outcome {
        Outcome {
            assert: self.cmd.assert().failure(),
        }
    }
}

pub struct Outcome {
    assert: assert_cmd::assert::Assert,
}

impl Outcome {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(expected.to_string()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }
}
