// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-to-production file pairing.
//!
//! Pairs are resolved against the set of production files found by the
//! walk, never by probing the filesystem, so a single walk fully
//! determines the result.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::classify::PathClassifier;
use crate::error::Result;
use crate::walker::{FileWalker, WalkStats};

/// Mapping from every discovered test file to its production file, if any.
///
/// Keys iterate in sorted path order so reports are reproducible
/// regardless of walk order. `None` is the unmatched marker.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilePairMap {
    pairs: BTreeMap<PathBuf, Option<PathBuf>>,
}

impl FilePairMap {
    /// Number of test files.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Production file paired with `test`.
    ///
    /// Outer `None`: `test` is not a known test file.
    /// Inner `None`: known but unmatched.
    pub fn get(&self, test: &Path) -> Option<Option<&Path>> {
        self.pairs.get(test).map(|p| p.as_deref())
    }

    /// Iterate `(test, production)` pairs in sorted test-path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, Option<&Path>)> {
        self.pairs
            .iter()
            .map(|(test, prod)| (test.as_path(), prod.as_deref()))
    }

    /// Number of test files with a production counterpart.
    pub fn matched(&self) -> usize {
        self.pairs.values().filter(|p| p.is_some()).count()
    }

    /// Number of test files without a production counterpart.
    pub fn unmatched(&self) -> usize {
        self.len() - self.matched()
    }
}

/// Pair test files among `files` with production files among `files`.
///
/// The naming heuristic runs on each path relative to `root`, so directory
/// names above the root never take part in the substitution.
pub fn pair_files<I>(root: &Path, files: I, classifier: &dyn PathClassifier) -> FilePairMap
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut tests = Vec::new();
    let mut production = HashSet::new();

    for path in files {
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if classifier.is_test_file(relative) {
            tests.push(path);
        } else {
            production.insert(path);
        }
    }

    let pairs = tests
        .into_iter()
        .map(|test| {
            let relative = test.strip_prefix(root).unwrap_or(&test);
            let candidate = root.join(classifier.candidate_production_path(relative));
            let paired = production.contains(&candidate).then_some(candidate);
            if paired.is_none() {
                tracing::debug!("no production file for {}", test.display());
            }
            (test, paired)
        })
        .collect();

    FilePairMap { pairs }
}

/// Walk `root` and pair every test file found.
///
/// Fails only if `root` itself cannot be traversed.
pub fn build_pairs(
    root: &Path,
    walker: &FileWalker,
    classifier: &dyn PathClassifier,
) -> Result<(FilePairMap, WalkStats)> {
    let (files, stats) = walker.walk_collect(root)?;
    tracing::debug!(
        "walked {}: {} files, {} irregular skipped, {} errors",
        root.display(),
        stats.files_found,
        stats.irregular_skipped,
        stats.errors
    );

    let pairs = pair_files(root, files.into_iter().map(|f| f.path), classifier);
    Ok((pairs, stats))
}

#[cfg(test)]
#[path = "pairing_tests.rs"]
mod tests;
