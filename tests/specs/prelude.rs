//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing smelltab CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the smelltab binary
pub fn smelltab_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("smelltab"));
    cmd.env_remove("SMELLTAB_CONFIG").env_remove("SMELLTAB_LOG");
    cmd
}

/// Create a detect command builder
pub fn detect() -> DetectBuilder {
    DetectBuilder::default()
}

/// Detect command builder for fluent test assertions
#[derive(Default)]
pub struct DetectBuilder {
    dir: Option<PathBuf>,
    target: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl DetectBuilder {
    /// Analyze a fixture directory
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.target = Some(fixture(fixture_name));
        self
    }

    /// Analyze `path`
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    /// Run from `path` (the default target when none is given)
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let mut cmd = smelltab_cmd();
        cmd.arg("detect");
        if let Some(target) = &self.target {
            cmd.arg(target);
        }
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parsed report: header followed by rows, naively split on commas.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.stdout()
            .lines()
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Project
// =============================================================================

/// Temporary test project directory with helper methods.
///
/// # Examples
///
/// ```ignore
/// let temp = Project::empty();
/// temp.config("[project]\napp = \"demo\"");
/// temp.file("src/test/java/FooTest.java", "class FooTest {}");
/// detect().target(temp.path()).passes();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Canonical project path, as it appears in absolute report cells
    pub fn canonical(&self) -> PathBuf {
        self.dir.path().canonicalize().unwrap()
    }

    /// Write smelltab.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("smelltab.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }
}
