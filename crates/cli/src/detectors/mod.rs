// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in smell detectors.
//!
//! [`JUnitDetector`] is the engine the binary ships with. It reads each
//! test file, extracts annotated test methods lexically and counts, per
//! smell, how many of them exhibit it.

pub mod java;
pub mod smells;

use std::path::Path;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;

use crate::detector::{SmellDetector, SmellResult};
use crate::diag;
use crate::error::{Error, Result};
use crate::unit::SourceUnit;
use java::TestMethod;
use smells::Smell;

/// Cheap check for files that cannot contain test methods.
#[allow(clippy::expect_used)]
static TEST_MARKERS: LazyLock<AhoCorasick> = LazyLock::new(|| {
    AhoCorasick::new(java::TEST_ANNOTATIONS.map(|name| format!("@{name}")))
        .expect("valid patterns")
});

/// Lexical JUnit 4/5 smell detector.
pub struct JUnitDetector {
    smells: Vec<Box<dyn Smell>>,
}

impl Default for JUnitDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl JUnitDetector {
    pub fn new() -> Self {
        Self {
            smells: smells::catalog(),
        }
    }

    fn test_methods(&self, path: &Path) -> Result<Vec<TestMethod>> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if !TEST_MARKERS.is_match(&source) {
            diag!("{}: no test annotations", path.display());
            return Ok(Vec::new());
        }

        java::test_methods(&source).map_err(|e| Error::detection(path, e.to_string()))
    }
}

impl SmellDetector for JUnitDetector {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn smell_names(&self) -> Vec<String> {
        self.smells.iter().map(|s| s.name().to_string()).collect()
    }

    fn count_test_methods(&self, test_path: &Path) -> Result<usize> {
        Ok(self.test_methods(test_path)?.len())
    }

    fn detect(&self, unit: &SourceUnit) -> Result<Vec<SmellResult>> {
        let methods = self.test_methods(unit.test_path())?;
        diag!(
            "{}: {} test methods, production {}",
            unit.test_name(),
            methods.len(),
            unit.production_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unknown".to_string())
        );

        // Nothing to measure: every smell is unavailable rather than zero.
        if methods.is_empty() {
            return Ok(vec![None; self.smells.len()]);
        }

        let results = self
            .smells
            .iter()
            .map(|smell| {
                let affected: Vec<&str> = methods
                    .iter()
                    .filter(|m| smell.is_smelly(m))
                    .map(|m| m.name.as_str())
                    .collect();
                if !affected.is_empty() {
                    diag!("  {}: {}", smell.name(), affected.join(", "));
                }
                Some(affected.len())
            })
            .collect();
        Ok(results)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
