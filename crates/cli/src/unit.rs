// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One test file and everything the report says about it besides smells.

use std::path::{Path, PathBuf};

/// A test file paired (or not) with its production file.
///
/// Built once per test file before any detection runs; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    app: String,
    test_name: String,
    test_path: PathBuf,
    production_path: Option<PathBuf>,
    relative_test_path: PathBuf,
    relative_production_path: Option<PathBuf>,
    test_methods: usize,
}

impl SourceUnit {
    /// Build a unit for `test_path`, deriving names and root-relative paths.
    pub fn new(
        app: impl Into<String>,
        root: &Path,
        test_path: PathBuf,
        production_path: Option<PathBuf>,
        test_methods: usize,
    ) -> Self {
        let relative = |p: &Path| p.strip_prefix(root).unwrap_or(p).to_path_buf();

        Self {
            app: app.into(),
            test_name: test_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            relative_test_path: relative(&test_path),
            relative_production_path: production_path.as_deref().map(relative),
            test_path,
            production_path,
            test_methods,
        }
    }

    /// Project label shared by every unit of a run.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Test file name without its extension (`CalcTest`).
    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn test_path(&self) -> &Path {
        &self.test_path
    }

    /// Paired production file, `None` when unmatched.
    pub fn production_path(&self) -> Option<&Path> {
        self.production_path.as_deref()
    }

    pub fn relative_test_path(&self) -> &Path {
        &self.relative_test_path
    }

    pub fn relative_production_path(&self) -> Option<&Path> {
        self.relative_production_path.as_deref()
    }

    /// Number of test methods declared in the test file.
    pub fn test_methods(&self) -> usize {
        self.test_methods
    }
}

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;
