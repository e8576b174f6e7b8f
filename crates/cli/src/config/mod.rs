// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles smelltab.toml parsing with version validation and unknown key warnings.

pub mod duration;
mod parse;

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::report::Quoting;
use parse::{
    parse_detect_config, parse_pairing_config, parse_project_config, parse_report_config,
    parse_walk_config, warn_unknown_key,
};

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: Option<i64>,

    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(default)]
    pairing: Option<toml::Value>,

    #[serde(default)]
    walk: Option<toml::Value>,

    #[serde(default)]
    report: Option<toml::Value>,

    #[serde(default)]
    detect: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Project labelling.
    pub project: ProjectConfig,

    /// Test/production naming convention.
    pub pairing: PairingConfig,

    /// Directory walking options.
    pub walk: WalkConfig,

    /// Report rendering options.
    pub report: ReportConfig,

    /// Detection scheduling options.
    pub detect: DetectConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            project: ProjectConfig::default(),
            pairing: PairingConfig::default(),
            walk: WalkConfig::default(),
            report: ReportConfig::default(),
            detect: DetectConfig::default(),
        }
    }
}

/// Project configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Label written to the `App` column of every row.
    pub app: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            app: Self::default_app(),
        }
    }
}

impl ProjectConfig {
    pub(crate) fn default_app() -> String {
        "myApp".to_string()
    }
}

/// Naming convention used to recognise test files and derive their production counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingConfig {
    /// Path segment holding test sources (default: "test").
    pub test_dir: String,

    /// Path segment holding production sources (default: "main").
    pub main_dir: String,

    /// Filename suffix that marks a test file, before the extension (default: "Test").
    pub test_suffix: String,

    /// Source extensions without the dot (default: ["java"]).
    pub extensions: Vec<String>,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            test_dir: Self::default_test_dir(),
            main_dir: Self::default_main_dir(),
            test_suffix: Self::default_test_suffix(),
            extensions: Self::default_extensions(),
        }
    }
}

impl PairingConfig {
    pub(crate) fn default_test_dir() -> String {
        "test".to_string()
    }

    pub(crate) fn default_main_dir() -> String {
        "main".to_string()
    }

    pub(crate) fn default_test_suffix() -> String {
        "Test".to_string()
    }

    pub(crate) fn default_extensions() -> Vec<String> {
        vec!["java".to_string()]
    }
}

/// Walker configuration as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkConfig {
    /// Respect .gitignore files (default: false, every regular file is considered).
    pub git_ignore: bool,

    /// Skip hidden files and directories (default: false).
    pub hidden: bool,

    /// Glob patterns excluded from the walk.
    pub exclude: Vec<String>,

    /// Maximum directory depth.
    pub max_depth: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            git_ignore: false,
            hidden: false,
            exclude: Vec::new(),
            max_depth: crate::walker::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// How cells containing separators are written.
    pub quoting: Quoting,
}

/// Detection scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectConfig {
    /// Worker threads for detection (1 = sequential, 0 = one per core).
    pub jobs: usize,

    /// Per-file detection time limit (None = unlimited).
    pub timeout: Option<Duration>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            jobs: 1,
            timeout: None,
        }
    }
}

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Config file name looked up by discovery.
pub const CONFIG_FILE_NAME: &str = "smelltab.toml";

/// Load and parse config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
///
/// Unknown keys produce a warning on stderr and are otherwise ignored.
/// Known keys holding a value of the wrong TOML type are errors.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = flexible.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade smelltab to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    for key in flexible.unknown.keys() {
        warn_unknown_key(path, key);
    }

    Ok(Config {
        version,
        project: parse_project_config(flexible.project.as_ref(), path)?,
        pairing: parse_pairing_config(flexible.pairing.as_ref(), path)?,
        walk: parse_walk_config(flexible.walk.as_ref(), path)?,
        report: parse_report_config(flexible.report.as_ref(), path)?,
        detect: parse_detect_config(flexible.detect.as_ref(), path)?,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
