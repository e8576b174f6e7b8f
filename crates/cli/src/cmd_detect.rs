// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Detect command implementation.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use smelltab::classify::ConventionClassifier;
use smelltab::cli::{Cli, DetectArgs};
use smelltab::detectors::JUnitDetector;
use smelltab::discovery;
use smelltab::error::{Error, ExitCode};
use smelltab::runner::{Orchestrator, RunOptions};
use smelltab::walker::{FileWalker, WalkerConfig};

/// Run the detect command.
pub fn run(cli: &Cli, args: &DetectArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let cwd = std::env::current_dir()?;

    let root = match &args.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => cwd.join(path),
        None => cwd.clone(),
    };

    let config_start = if root.is_dir() { &root } else { &cwd };
    let config = discovery::load_config(cli.config.as_deref(), config_start)?;

    let options = RunOptions {
        app: args.app.clone().unwrap_or_else(|| config.project.app.clone()),
        jobs: args.jobs.unwrap_or(config.detect.jobs),
        timeout: args.timeout.or(config.detect.timeout),
        quoting: args.quoting.unwrap_or(config.report.quoting),
    };
    tracing::debug!("run options: {:?}", options);

    let orchestrator = Orchestrator::new(
        Arc::new(JUnitDetector::new()),
        Box::new(ConventionClassifier::from_config(&config.pairing)),
        FileWalker::new(WalkerConfig::from(&config.walk)),
        options,
    );

    // A bad root must not leave an empty report file behind.
    FileWalker::check_root(&root)?;

    let stats = match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            orchestrator.run(&root, file)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let stats = orchestrator.run(&root, &mut out)?;
            out.flush().map_err(Error::Report)?;
            stats
        }
    };

    tracing::info!(
        "{} test files ({} matched, {} unmatched, {} failed) in {:?}",
        stats.units,
        stats.matched,
        stats.unmatched,
        stats.failed,
        start.elapsed()
    );
    if stats.walk.errors > 0 {
        tracing::warn!("{} entries could not be read", stats.walk.errors);
    }

    Ok(ExitCode::Success)
}
