// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test/production path classification.
//!
//! The default convention mirrors Maven/Gradle source sets:
//! `src/test/java/pkg/FooTest.java` is exercised against
//! `src/main/java/pkg/Foo.java`.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::config::PairingConfig;

/// Decides which files are tests and where their production counterpart should live.
///
/// Implementations must be pure: the same path always yields the same answer.
pub trait PathClassifier: Send + Sync {
    /// True if `path` names a test file.
    fn is_test_file(&self, path: &Path) -> bool;

    /// Candidate production path for a test file.
    ///
    /// The candidate is a guess; callers decide whether it exists.
    fn candidate_production_path(&self, test_path: &Path) -> PathBuf;
}

/// Suffix-and-directory naming convention.
#[derive(Debug, Clone)]
pub struct ConventionClassifier {
    test_dir: String,
    main_dir: String,
    test_suffix: String,
    extensions: Vec<String>,
}

impl Default for ConventionClassifier {
    fn default() -> Self {
        Self::from_config(&PairingConfig::default())
    }
}

impl ConventionClassifier {
    pub fn from_config(config: &PairingConfig) -> Self {
        Self {
            test_dir: config.test_dir.clone(),
            main_dir: config.main_dir.clone(),
            test_suffix: config.test_suffix.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Split a test file name into its bare stem and extension.
    ///
    /// `CalcTest.java` → `("Calc", "java")`.
    fn split_test_name<'a>(&self, file_name: &'a str) -> Option<(&'a str, &'a str)> {
        self.extensions.iter().find_map(|ext| {
            let rest = file_name.strip_suffix(ext.as_str())?.strip_suffix('.')?;
            let stem = rest.strip_suffix(self.test_suffix.as_str())?;
            let ext_start = file_name.len() - ext.len();
            Some((stem, &file_name[ext_start..]))
        })
    }
}

impl PathClassifier for ConventionClassifier {
    fn is_test_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.split_test_name(n))
            .is_some()
    }

    fn candidate_production_path(&self, test_path: &Path) -> PathBuf {
        let mut replaced = false;
        let mut candidate: PathBuf = test_path
            .components()
            .map(|component| match component {
                Component::Normal(segment) if !replaced && segment == self.test_dir.as_str() => {
                    replaced = true;
                    OsString::from(&self.main_dir)
                }
                other => other.as_os_str().to_os_string(),
            })
            .collect();

        let stripped = test_path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| self.split_test_name(n))
            .map(|(stem, ext)| format!("{}.{}", stem, ext));
        if let Some(name) = stripped {
            candidate.set_file_name(name);
        }

        candidate
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
