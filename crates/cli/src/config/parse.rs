// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.
//!
//! Absent keys take their default. Present keys must have the expected
//! TOML type; anything else is a config error naming `section.key`.

use std::path::Path;

use super::duration::parse_duration;
use super::{DetectConfig, PairingConfig, ProjectConfig, ReportConfig, WalkConfig};
use crate::error::{Error, Result};
use crate::report::Quoting;

fn config_error(path: &Path, message: String) -> Error {
    Error::Config {
        message,
        path: Some(path.to_path_buf()),
    }
}

/// One `[section]` table plus what is needed to report its mistakes.
struct Section<'a> {
    name: &'static str,
    table: Option<&'a toml::Table>,
    path: &'a Path,
}

impl<'a> Section<'a> {
    /// Accept a missing section; reject a section that is not a table.
    fn new(name: &'static str, value: Option<&'a toml::Value>, path: &'a Path) -> Result<Self> {
        let table = match value {
            None => None,
            Some(toml::Value::Table(t)) => Some(t),
            Some(other) => {
                return Err(config_error(
                    path,
                    format!("[{}] must be a table, found {}", name, other.type_str()),
                ));
            }
        };
        Ok(Self { name, table, path })
    }

    fn get(&self, key: &str) -> Option<&'a toml::Value> {
        self.table?.get(key)
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &toml::Value) -> Error {
        config_error(
            self.path,
            format!(
                "{}.{}: expected {}, found {}",
                self.name,
                key,
                expected,
                found.type_str()
            ),
        )
    }

    /// Warn about keys that are not in `known`.
    fn warn_unknown(&self, known: &[&str]) {
        let Some(table) = self.table else {
            return;
        };
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                warn_unknown_key(self.path, &format!("{}.{}", self.name, key));
            }
        }
    }

    fn string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(toml::Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(key, "a string", other)),
        }
    }

    fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(toml::Value::Boolean(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(key, "a boolean", other)),
        }
    }

    fn usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_integer()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.wrong_type(key, "a non-negative integer", value)),
        }
    }

    fn strings(&self, key: &str) -> Result<Option<Vec<String>>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let toml::Value::Array(items) = value else {
            return Err(self.wrong_type(key, "an array of strings", value));
        };
        items
            .iter()
            .map(|item| match item {
                toml::Value::String(s) => Ok(s.clone()),
                other => Err(self.wrong_type(key, "an array of strings", other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// Warn about an unrecognized key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "smelltab: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Parse `[project]`.
pub(super) fn parse_project_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<ProjectConfig> {
    let section = Section::new("project", value, path)?;
    section.warn_unknown(&["app"]);

    Ok(ProjectConfig {
        app: section
            .string("app")?
            .unwrap_or_else(ProjectConfig::default_app),
    })
}

/// Parse `[pairing]`, rejecting tokens that cannot form a path segment.
pub(super) fn parse_pairing_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<PairingConfig> {
    let section = Section::new("pairing", value, path)?;
    section.warn_unknown(&["test_dir", "main_dir", "test_suffix", "extensions"]);

    let config = PairingConfig {
        test_dir: section
            .string("test_dir")?
            .unwrap_or_else(PairingConfig::default_test_dir),
        main_dir: section
            .string("main_dir")?
            .unwrap_or_else(PairingConfig::default_main_dir),
        test_suffix: section
            .string("test_suffix")?
            .unwrap_or_else(PairingConfig::default_test_suffix),
        extensions: section
            .strings("extensions")?
            .unwrap_or_else(PairingConfig::default_extensions)
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect(),
    };

    for (name, token) in [
        ("pairing.test_dir", &config.test_dir),
        ("pairing.main_dir", &config.main_dir),
        ("pairing.test_suffix", &config.test_suffix),
    ] {
        if token.is_empty() || token.contains(['/', '\\']) {
            return Err(config_error(
                path,
                format!("{} must be a non-empty name without separators", name),
            ));
        }
    }

    if config.extensions.is_empty() || config.extensions.iter().any(|e| e.is_empty()) {
        return Err(config_error(
            path,
            "pairing.extensions must list at least one extension".to_string(),
        ));
    }

    Ok(config)
}

/// Parse `[walk]`.
pub(super) fn parse_walk_config(value: Option<&toml::Value>, path: &Path) -> Result<WalkConfig> {
    let section = Section::new("walk", value, path)?;
    section.warn_unknown(&["git_ignore", "hidden", "exclude", "max_depth"]);

    let defaults = WalkConfig::default();
    Ok(WalkConfig {
        git_ignore: section.bool("git_ignore")?.unwrap_or(defaults.git_ignore),
        hidden: section.bool("hidden")?.unwrap_or(defaults.hidden),
        exclude: section.strings("exclude")?.unwrap_or(defaults.exclude),
        max_depth: section.usize("max_depth")?.unwrap_or(defaults.max_depth),
    })
}

/// Parse `[report]`.
pub(super) fn parse_report_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<ReportConfig> {
    let section = Section::new("report", value, path)?;
    section.warn_unknown(&["quoting"]);

    let quoting = match section.string("quoting")? {
        None => Quoting::default(),
        Some(name) => Quoting::from_name(&name).ok_or_else(|| {
            config_error(
                path,
                format!(
                    "report.quoting: unknown mode `{}` (use \"none\" or \"minimal\")",
                    name
                ),
            )
        })?,
    };

    Ok(ReportConfig { quoting })
}

/// Parse `[detect]`.
pub(super) fn parse_detect_config(
    value: Option<&toml::Value>,
    path: &Path,
) -> Result<DetectConfig> {
    let section = Section::new("detect", value, path)?;
    section.warn_unknown(&["jobs", "timeout"]);

    let timeout = match section.string("timeout")? {
        None => None,
        Some(s) => Some(
            parse_duration(&s).map_err(|e| config_error(path, format!("detect.timeout: {}", e)))?,
        ),
    };

    Ok(DetectConfig {
        jobs: section
            .usize("jobs")?
            .unwrap_or(DetectConfig::default().jobs),
        timeout,
    })
}
