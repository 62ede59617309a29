//! Shared helpers for CLI specs

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The canonical two-pulse scenario: a button held on ticks 1-3 and 10-12
pub const BUTTON_SCENARIO: &str = r#"
ticks = 14

[signals]
button = [[1, 3], [10, 12]]

[[trigger]]
name = "held"
signal = "button"
until_after = 12

[[trigger]]
name = "pressed"
signal = "button"
edge = "rising"
extend_iterations = 3
until_after = 12
"#;

/// A scratch directory holding scenario files
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` under the project, returning its path
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// A `smith` invocation rooted in the project directory
    pub fn smith(&self) -> Smith {
        let mut cmd = Command::cargo_bin("smith").expect("smith binary");
        cmd.current_dir(self.dir.path()).env_remove("SMITH_LOG").env_remove("RUST_LOG");
        Smith { cmd }
    }
}

pub struct Smith {
    cmd: Command,
}

impl Smith {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require a zero exit status
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().expect("run smith");
        let run = RunAssert::from(output);
        assert!(
            run.success,
            "expected success, got failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout, run.stderr
        );
        run
    }

    /// Run and require a non-zero exit status
    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().expect("run smith");
        let run = RunAssert::from(output);
        assert!(
            !run.success,
            "expected failure, got success\nstdout:\n{}",
            run.stdout
        );
        run
    }
}

pub struct RunAssert {
    success: bool,
    stdout: String,
    stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout.contains(needle),
            "stdout does not contain {:?}\nstdout:\n{}",
            needle,
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr.contains(needle),
            "stderr does not contain {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }

    pub fn stderr_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stderr.contains(needle),
            "stderr unexpectedly contains {:?}\nstderr:\n{}",
            needle,
            self.stderr
        );
        self
    }
}
