// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File walking for pairing discovery.
//!
//! Uses the `ignore` crate for file discovery. Only regular files are
//! reported: symlinks are neither followed nor emitted, and directories
//! only drive traversal.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};
use ignore::overrides::OverrideBuilder;
use ignore::{WalkBuilder, WalkState};

use crate::config::WalkConfig;
use crate::error::{Error, Result};

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories skipped entirely during walking.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &[".git"];

/// Default threshold for switching from sequential to parallel walking.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1000;

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Glob patterns excluded from the walk.
    pub exclude_patterns: Vec<String>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,

    /// Number of threads (0 = auto).
    pub threads: usize,

    /// Top-level entry count (x10) above which the walk runs in parallel.
    pub parallel_threshold: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            exclude_patterns: Vec::new(),
            git_ignore: false,
            hidden: false,
            threads: 0,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl From<&WalkConfig> for WalkerConfig {
    fn from(walk: &WalkConfig) -> Self {
        Self {
            max_depth: Some(walk.max_depth),
            exclude_patterns: walk.exclude.clone(),
            git_ignore: walk.git_ignore,
            hidden: walk.hidden,
            ..Default::default()
        }
    }
}

/// Regular file discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Path to the file, rooted at the walk root.
    pub path: PathBuf,

    /// Directory depth from root.
    pub depth: usize,
}

/// Statistics from a walk operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    /// Regular files discovered.
    pub files_found: usize,

    /// Symlinks and other non-regular entries that were not reported.
    pub irregular_skipped: usize,

    /// Errors encountered below the root (unreadable subdirectories etc.).
    pub errors: usize,
}

/// Outcome of classifying one walk entry.
enum Visit {
    File(WalkedFile),
    Irregular,
    Directory,
}

fn visit(entry: ignore::DirEntry) -> Visit {
    match entry.file_type() {
        Some(t) if t.is_file() => Visit::File(WalkedFile {
            depth: entry.depth(),
            path: entry.into_path(),
        }),
        Some(t) if t.is_dir() => Visit::Directory,
        _ => Visit::Irregular,
    }
}

/// File walker over a single root.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    /// Create a new walker with the given configuration.
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Confirm the root is a directory we can list.
    ///
    /// Everything the pairing step reports hinges on this, so failure here
    /// is fatal rather than a counted walk error.
    pub fn check_root(root: &Path) -> Result<()> {
        let walk_error = |message: String| Error::Walk {
            root: root.to_path_buf(),
            message,
        };

        let meta = std::fs::metadata(root).map_err(|e| walk_error(e.to_string()))?;
        if !meta.is_dir() {
            return Err(walk_error("not a directory".to_string()));
        }
        std::fs::read_dir(root).map_err(|e| walk_error(e.to_string()))?;
        Ok(())
    }

    fn should_use_parallel(&self, root: &Path) -> bool {
        // Top-level entry count is a cheap proxy for tree size.
        let entry_count = std::fs::read_dir(root)
            .map(|entries| entries.count())
            .unwrap_or(0);

        entry_count >= self.config.parallel_threshold / 10
    }

    fn builder(&self, root: &Path) -> Result<WalkBuilder> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .ignore(false)
            .parents(false)
            .follow_links(false)
            .max_depth(self.config.max_depth);

        if self.config.threads > 0 {
            builder.threads(self.config.threads);
        }

        // Override globs whitelist by default; `!` turns them into excludes.
        if !self.config.exclude_patterns.is_empty() {
            let mut overrides = OverrideBuilder::new(root);
            for pattern in &self.config.exclude_patterns {
                overrides
                    .add(&format!("!{}", pattern))
                    .map_err(|e| Error::Config {
                        message: format!("invalid walk.exclude pattern `{}`: {}", pattern, e),
                        path: None,
                    })?;
            }
            let overrides = overrides.build().map_err(|e| Error::Config {
                message: format!("invalid walk.exclude patterns: {}", e),
                path: None,
            })?;
            builder.overrides(overrides);
        }

        builder.filter_entry(|entry| {
            !entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
                || !entry
                    .file_name()
                    .to_str()
                    .map(|name| SKIP_DIRECTORIES.contains(&name))
                    .unwrap_or(false)
        });

        Ok(builder)
    }

    /// Walk the given root directory, returning a receiver of discovered files.
    ///
    /// Files are streamed through the channel in no particular order.
    /// The returned handle yields the walk statistics once joined.
    pub fn walk(&self, root: &Path) -> Result<(Receiver<WalkedFile>, WalkHandle)> {
        Self::check_root(root)?;
        let builder = self.builder(root)?;
        let (tx, rx) = bounded(1000);

        let handle = if self.should_use_parallel(root) {
            tracing::debug!("walking {} in parallel", root.display());
            Self::walk_parallel(builder, tx)
        } else {
            tracing::debug!("walking {} sequentially", root.display());
            Self::walk_sequential(builder, tx)
        };

        Ok((rx, handle))
    }

    fn walk_parallel(builder: WalkBuilder, tx: Sender<WalkedFile>) -> WalkHandle {
        let walker = builder.build_parallel();

        let files_found = Arc::new(AtomicUsize::new(0));
        let irregular = Arc::new(AtomicUsize::new(0));
        let errors = Arc::new(AtomicUsize::new(0));

        let stats_files = Arc::clone(&files_found);
        let stats_irregular = Arc::clone(&irregular);
        let stats_errors = Arc::clone(&errors);

        let handle = std::thread::spawn(move || {
            walker.run(|| {
                let tx = tx.clone();
                let files_found = Arc::clone(&stats_files);
                let irregular = Arc::clone(&stats_irregular);
                let errors = Arc::clone(&stats_errors);

                Box::new(move |entry| match entry {
                    Ok(entry) => match visit(entry) {
                        Visit::File(file) => {
                            files_found.fetch_add(1, Ordering::Relaxed);
                            if tx.send(file).is_err() {
                                return WalkState::Quit;
                            }
                            WalkState::Continue
                        }
                        Visit::Irregular => {
                            irregular.fetch_add(1, Ordering::Relaxed);
                            WalkState::Continue
                        }
                        Visit::Directory => WalkState::Continue,
                    },
                    Err(err) => {
                        tracing::warn!("walk error: {}", err);
                        errors.fetch_add(1, Ordering::Relaxed);
                        WalkState::Continue
                    }
                })
            });

            WalkStats {
                files_found: files_found.load(Ordering::Relaxed),
                irregular_skipped: irregular.load(Ordering::Relaxed),
                errors: errors.load(Ordering::Relaxed),
            }
        });

        WalkHandle { handle }
    }

    fn walk_sequential(builder: WalkBuilder, tx: Sender<WalkedFile>) -> WalkHandle {
        let walker = builder.build();

        let handle = std::thread::spawn(move || {
            let mut stats = WalkStats::default();

            for entry in walker {
                match entry {
                    Ok(entry) => match visit(entry) {
                        Visit::File(file) => {
                            stats.files_found += 1;
                            if tx.send(file).is_err() {
                                break;
                            }
                        }
                        Visit::Irregular => stats.irregular_skipped += 1,
                        Visit::Directory => {}
                    },
                    Err(err) => {
                        tracing::warn!("walk error: {}", err);
                        stats.errors += 1;
                    }
                }
            }

            stats
        });

        WalkHandle { handle }
    }

    /// Walk and collect all files.
    pub fn walk_collect(&self, root: &Path) -> Result<(Vec<WalkedFile>, WalkStats)> {
        let (rx, handle) = self.walk(root)?;
        let files: Vec<_> = rx.iter().collect();
        let stats = handle.join();
        Ok((files, stats))
    }
}

/// Handle to a running walk operation.
pub struct WalkHandle {
    handle: std::thread::JoinHandle<WalkStats>,
}

impl WalkHandle {
    /// Wait for the walk to complete and return stats.
    pub fn join(self) -> WalkStats {
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
