// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Smelltab CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use smelltab::cli::{Cli, Command};
use smelltab::completions::write_completions;
use smelltab::error::ExitCode;

mod cmd_detect;
mod cmd_smells;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SMELLTAB_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("smelltab: {}", e);
            match e.downcast_ref::<smelltab::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Detect(args)) => cmd_detect::run(&cli, args),
        Some(Command::Smells) => cmd_smells::run(),
        Some(Command::Completions(args)) => {
            write_completions(args.shell, &mut std::io::stdout().lock());
            Ok(ExitCode::Success)
        }
    }
}
