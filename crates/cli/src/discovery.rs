// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the analyzed directory up to the git root looking for smelltab.toml.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE_NAME, Config};
use crate::error::{Error, Result};

/// Find smelltab.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "SMELLTAB_CONFIG")
/// 2. Discovery from the analyzed directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, start_dir: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            if path.is_file() {
                Ok(Some(path.to_path_buf()))
            } else {
                Err(Error::Config {
                    message: format!("config file not found: {}", path.display()),
                    path: Some(path.to_path_buf()),
                })
            }
        }
        None => Ok(find_config(start_dir)),
    }
}

/// Resolve and load the config for a run rooted at `start_dir`.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<Config> {
    match resolve_config(explicit, start_dir)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(&path)
        }
        None => {
            tracing::debug!("no config found, using defaults");
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
