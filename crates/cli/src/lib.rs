//! Smelltab library.
//!
//! Pairs test files with production files, runs a smell detector over each
//! test file and streams a CSV report with one row per test file.

pub mod classify;
pub mod cli;
pub mod completions;
pub mod config;
pub mod detector;
pub mod detectors;
pub mod discovery;
pub mod error;
pub mod isolate;
pub mod pairing;
pub mod report;
pub mod runner;
pub mod unit;
pub mod walker;

pub use classify::{ConventionClassifier, PathClassifier};
pub use cli::{Cli, Command, DetectArgs};
pub use config::Config;
pub use detector::{SmellCatalog, SmellDetector, SmellResult};
pub use detectors::JUnitDetector;
pub use error::{Error, ExitCode, Result};
pub use pairing::{FilePairMap, build_pairs};
pub use report::{Quoting, ReportRow, ReportSchema};
pub use runner::{Orchestrator, RunOptions, RunStats};
pub use unit::SourceUnit;
pub use walker::{FileWalker, WalkStats, WalkedFile, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
