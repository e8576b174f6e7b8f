//! Behavioral specifications for smelltab CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/config.rs"]
mod config;

#[path = "specs/detect.rs"]
mod detect;

use prelude::*;

// =============================================================================
// COMMAND SPECS
// =============================================================================

/// > smelltab (bare invocation) shows help
#[test]
fn bare_invocation_shows_help() {
    smelltab_cmd()
        .assert()
        .success()
        .stdout(predicates::str::contains("Usage:"));
}

/// > Exit code 0 when invoked with --help
#[test]
fn help_exits_successfully() {
    smelltab_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicates::str::contains("detect"))
        .stdout(predicates::str::contains("smells"));
}

/// > -V shows version
#[test]
fn short_version_flag_works() {
    smelltab_cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicates::str::contains(env!("CARGO_PKG_VERSION")));
}

/// > Exit code 2 for unknown commands
#[test]
fn unknown_command_fails() {
    smelltab_cmd()
        .arg("unknown")
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unrecognized|unknown)").unwrap());
}

/// > Unknown flags to detect produce error
#[test]
fn detect_unknown_flag_fails() {
    smelltab_cmd()
        .args(["detect", "--unknown-option"])
        .assert()
        .code(2)
        .stderr(predicates::str::is_match(r"(?i)(unexpected|unknown|unrecognized)").unwrap());
}

/// > Invalid --quoting values are argument errors
#[test]
fn detect_bad_quoting_fails() {
    smelltab_cmd()
        .args(["detect", "--quoting", "always"])
        .assert()
        .code(2);
}

// =============================================================================
// SMELLS COMMAND SPECS
// =============================================================================

/// > smelltab smells lists the catalog, one per line, in column order
#[test]
fn smells_lists_catalog_in_order() {
    smelltab_cmd().arg("smells").assert().success().stdout(
        "Assertion Roulette\n\
         Conditional Test Logic\n\
         Empty Test\n\
         Exception Catching Throwing\n\
         IgnoredTest\n\
         Magic Number Test\n\
         Redundant Print\n\
         Sleepy Test\n\
         Unknown Test\n",
    );
}

// =============================================================================
// COMPLETIONS SPECS
// =============================================================================

/// > smelltab completions <shell> prints a completion script
#[test]
fn completions_prints_script() {
    smelltab_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicates::str::contains("smelltab"));
}

// =============================================================================
// ENVIRONMENT VARIABLE SPECS
// =============================================================================

/// > SMELLTAB_LOG enables debug logging to stderr, never stdout
#[test]
fn env_log_goes_to_stderr() {
    let run = detect()
        .on("calculator")
        .env("SMELLTAB_LOG", "debug")
        .passes()
        .stderr_has("DEBUG");
    assert!(run.stdout().starts_with("App,"));
    assert!(!run.stdout().contains("DEBUG"));
}

/// > SMELLTAB_LOG=trace surfaces detector chatter in the log only
#[test]
fn env_log_trace_shows_detector_chatter() {
    let run = detect()
        .on("calculator")
        .env("SMELLTAB_LOG", "trace")
        .passes()
        .stderr_has("test methods");
    assert!(!run.stdout().contains("test methods"));
}
