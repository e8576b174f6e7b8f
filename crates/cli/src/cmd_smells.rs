// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Smells command implementation.

use std::io::Write;

use smelltab::detector::SmellCatalog;
use smelltab::detectors::JUnitDetector;
use smelltab::error::ExitCode;

/// Print the catalog, one smell per line, in report column order.
pub fn run() -> anyhow::Result<ExitCode> {
    let catalog = SmellCatalog::of(&JUnitDetector::new());
    let mut out = std::io::stdout().lock();
    for name in catalog.names() {
        writeln!(out, "{name}")?;
    }
    Ok(ExitCode::Success)
}
