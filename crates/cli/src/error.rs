// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// Smelltab error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run root could not be traversed.
    #[error("walk error: {}: {message}", .root.display())]
    Walk { root: PathBuf, message: String },

    /// Smell detection failed for a single test file.
    ///
    /// Recovered by the runner; never aborts a run.
    #[error("detection failed: {}: {message}", .path.display())]
    Detection { path: PathBuf, message: String },

    /// Writing the report stream failed.
    #[error("report write failed: {0}")]
    Report(#[source] std::io::Error),

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a detection error for `path`.
    pub fn detection(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Detection {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type using smelltab Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Report written
    Success = 0,
    /// Configuration or argument error
    ConfigError = 2,
    /// Filesystem or internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } | Error::Walk { .. } => ExitCode::InternalError,
            Error::Report(_) | Error::Detection { .. } | Error::Internal(_) => {
                ExitCode::InternalError
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
