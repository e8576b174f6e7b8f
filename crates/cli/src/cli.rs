// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::report::Quoting;

/// Pair JUnit tests with production code and tabulate their test smells
#[derive(Parser)]
#[command(name = "smelltab")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SMELLTAB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a project and print the smell report as CSV
    Detect(DetectArgs),
    /// List the smells the detector reports, in column order
    Smells,
    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(clap::Args)]
pub struct DetectArgs {
    /// Project directory to analyze (default: current directory)
    #[arg(value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Label for the App column
    #[arg(long, value_name = "LABEL")]
    pub app: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How cells containing separators are written
    #[arg(long, value_enum)]
    pub quoting: Option<Quoting>,

    /// Detection threads (0 = one per core)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Per-file detection time limit (e.g. 30s, 500ms)
    #[arg(long, value_name = "DURATION", value_parser = parse_timeout)]
    pub timeout: Option<std::time::Duration>,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

fn parse_timeout(s: &str) -> Result<std::time::Duration, String> {
    crate::config::duration::parse_duration(s)
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
