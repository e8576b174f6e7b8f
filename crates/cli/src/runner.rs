// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run orchestration.
//!
//! Pairs files, builds one [`SourceUnit`] per test file, then streams the
//! report: header first, then one row per unit in sorted test-path order.
//! Detection failures are isolated to their unit. Only a traversal failure
//! (before the header) or a failed write to the report stream ends a run.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, bounded, unbounded};
use rayon::prelude::*;

use crate::classify::PathClassifier;
use crate::detector::{SmellCatalog, SmellDetector, SmellResult};
use crate::error::{Error, Result};
use crate::isolate::{run_captured, run_isolated};
use crate::pairing::{FilePairMap, build_pairs};
use crate::report::{CsvWriter, Quoting, ReportSchema};
use crate::unit::SourceUnit;
use crate::walker::{FileWalker, WalkStats};

/// Per-run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Label written in the `App` column.
    pub app: String,
    /// Detection threads (1 = sequential, 0 = one per core).
    pub jobs: usize,
    /// Per-unit detection time limit.
    pub timeout: Option<Duration>,
    pub quoting: Quoting,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            app: crate::config::ProjectConfig::default_app(),
            jobs: 1,
            timeout: None,
            quoting: Quoting::default(),
        }
    }
}

/// What a run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Rows written (one per test file).
    pub units: usize,
    /// Units with a production counterpart.
    pub matched: usize,
    /// Units without a production counterpart.
    pub unmatched: usize,
    /// Units whose detection failed, panicked or timed out.
    pub failed: usize,
    pub walk: WalkStats,
}

/// Drives pairing, detection and report assembly for one root.
pub struct Orchestrator {
    detector: Arc<dyn SmellDetector>,
    classifier: Box<dyn PathClassifier>,
    walker: FileWalker,
    options: RunOptions,
}

impl Orchestrator {
    pub fn new(
        detector: Arc<dyn SmellDetector>,
        classifier: Box<dyn PathClassifier>,
        walker: FileWalker,
        options: RunOptions,
    ) -> Self {
        Self {
            detector,
            classifier,
            walker,
            options,
        }
    }

    /// Analyze `root` and write the report to `out`.
    ///
    /// Nothing is written if `root` cannot be traversed.
    pub fn run<W: Write>(&self, root: &Path, out: W) -> Result<RunStats> {
        FileWalker::check_root(root)?;
        let root = root.canonicalize().map_err(|e| Error::Walk {
            root: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let (pairs, walk) = build_pairs(&root, &self.walker, self.classifier.as_ref())?;
        let catalog = SmellCatalog::of(self.detector.as_ref());
        let schema = ReportSchema::new(&catalog);
        let units = self.build_units(&root, &pairs);
        tracing::debug!(
            "{} units, {} smells, detector {}",
            units.len(),
            catalog.len(),
            self.detector.name()
        );

        let mut stats = RunStats {
            units: units.len(),
            matched: pairs.matched(),
            unmatched: pairs.unmatched(),
            failed: 0,
            walk,
        };

        let mut writer = CsvWriter::new(out, self.options.quoting);
        writer.write_row(&schema.header()).map_err(Error::Report)?;

        let mut emit = |index: usize, outcome: Result<Vec<SmellResult>>| -> Result<()> {
            let unit = &units[index];
            let results = match outcome {
                Ok(results) => {
                    if results.len() != catalog.len() {
                        tracing::warn!(
                            "{}: detector returned {} results for {} smells",
                            unit.test_path().display(),
                            results.len(),
                            catalog.len()
                        );
                    }
                    results
                }
                Err(err) => {
                    tracing::warn!("{}: {err}", unit.test_path().display());
                    stats.failed += 1;
                    Vec::new()
                }
            };
            writer
                .write_row(&schema.row(unit, &results))
                .map_err(Error::Report)
        };

        if self.options.jobs == 1 {
            for (index, unit) in units.iter().enumerate() {
                emit(index, self.detect_unit(unit))?;
            }
        } else {
            self.detect_parallel(&units, &mut emit)?;
        }

        Ok(stats)
    }

    fn build_units(&self, root: &Path, pairs: &FilePairMap) -> Vec<SourceUnit> {
        pairs
            .iter()
            .map(|(test, production)| {
                let methods = run_isolated(|| self.detector.count_test_methods(test))
                    .unwrap_or_else(|err| {
                        tracing::warn!("counting test methods: {err}");
                        0
                    });
                SourceUnit::new(
                    self.options.app.as_str(),
                    root,
                    test.to_path_buf(),
                    production.map(Path::to_path_buf),
                    methods,
                )
            })
            .collect()
    }

    /// Run detection on a rayon pool, emitting outcomes in unit order.
    fn detect_parallel(
        &self,
        units: &[SourceUnit],
        emit: &mut dyn FnMut(usize, Result<Vec<SmellResult>>) -> Result<()>,
    ) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.jobs)
            .thread_name(|i| format!("smelltab-detect-{i}"))
            .build()
            .map_err(|e| Error::Internal(format!("detection pool: {e}")))?;
        let (tx, rx) = unbounded();

        std::thread::scope(|scope| {
            scope.spawn(move || {
                pool.install(|| {
                    units
                        .par_iter()
                        .enumerate()
                        .for_each_with(tx, |tx, (index, unit)| {
                            // Receiver is gone only if the report write failed.
                            let _ = tx.send((index, self.detect_unit(unit)));
                        });
                });
            });

            let mut pending = BTreeMap::new();
            let mut next = 0;
            for (index, outcome) in rx {
                pending.insert(index, outcome);
                while let Some(outcome) = pending.remove(&next) {
                    emit(next, outcome)?;
                    next += 1;
                }
            }
            Ok(())
        })
    }

    fn detect_unit(&self, unit: &SourceUnit) -> Result<Vec<SmellResult>> {
        match self.options.timeout {
            None => detect_isolated(self.detector.as_ref(), unit),
            Some(limit) => self.detect_with_timeout(unit, limit),
        }
    }

    /// Detect on a helper thread, giving up after `limit`.
    ///
    /// An expired helper is abandoned; its result is discarded if it ever
    /// arrives.
    fn detect_with_timeout(&self, unit: &SourceUnit, limit: Duration) -> Result<Vec<SmellResult>> {
        let detector = Arc::clone(&self.detector);
        let owned = unit.clone();
        let (tx, rx) = bounded(1);

        std::thread::Builder::new()
            .name("smelltab-timeout".to_string())
            .spawn(move || {
                let _ = tx.send(detect_isolated(detector.as_ref(), &owned));
            })
            .map_err(|e| Error::Internal(format!("spawn detection thread: {e}")))?;

        match rx.recv_timeout(limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(Error::detection(
                unit.test_path(),
                format!("timed out after {limit:?}"),
            )),
            Err(RecvTimeoutError::Disconnected) => Err(Error::Internal(
                "detection thread exited without a result".to_string(),
            )),
        }
    }
}

/// Detect inside an isolation scope on the current thread.
///
/// With trace logging on, detector chatter is captured and logged instead
/// of dropped.
fn detect_isolated(detector: &dyn SmellDetector, unit: &SourceUnit) -> Result<Vec<SmellResult>> {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return run_isolated(|| detector.detect(unit));
    }

    let (result, captured) = run_captured(|| detector.detect(unit));
    for line in captured.lines() {
        tracing::trace!("{}: {line}", unit.test_name());
    }
    result
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
