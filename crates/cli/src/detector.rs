// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Interface to the smell detection engine.

use std::path::Path;

use crate::error::Result;
use crate::unit::SourceUnit;

/// Count of affected test methods for one smell, or `None` when unavailable.
pub type SmellResult = Option<usize>;

/// A smell detection engine.
///
/// Object-safe to allow dynamic dispatch via `Arc<dyn SmellDetector>`.
/// Detectors may be called from several threads at once and must not rely
/// on per-call mutable state.
pub trait SmellDetector: Send + Sync {
    /// Engine identifier for logs (e.g., "junit").
    fn name(&self) -> &'static str;

    /// Smell names in report column order.
    ///
    /// Must return the same sequence for the lifetime of the detector.
    fn smell_names(&self) -> Vec<String>;

    /// Number of test methods declared in `test_path`.
    fn count_test_methods(&self, test_path: &Path) -> Result<usize>;

    /// Detect smells in one unit.
    ///
    /// The result is aligned with [`smell_names`](Self::smell_names).
    /// Implementations may write progress through [`crate::diag!`]; that
    /// output never reaches the report. Writes that bypass it (`println!`,
    /// direct stdout handles) are not intercepted and land in the report
    /// when it is written to stdout.
    fn detect(&self, unit: &SourceUnit) -> Result<Vec<SmellResult>>;
}

/// Smell names captured once at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmellCatalog {
    names: Vec<String>,
}

impl SmellCatalog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Snapshot the catalog of `detector`.
    pub fn of(detector: &dyn SmellDetector) -> Self {
        Self::new(detector.smell_names())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
