// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion scripts for smelltab.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Binary name completions are generated for.
const BIN_NAME: &str = "smelltab";

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
}

#[cfg(test)]
#[path = "completions_tests.rs"]
mod tests;
