//! Result and error types for covdown.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for covdown operations
pub type CovdownResult<T> = Result<T, CovdownError>;

/// Errors that can occur while loading coverage data or building a report
#[derive(Debug, Error)]
pub enum CovdownError {
    /// Coverage data could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line of the input where parsing failed
        line: usize,
        /// Error message
        message: String,
    },

    /// A file was requested that the coverage data does not know about
    #[error("No coverage data for {}", path.display())]
    UnknownFile {
        /// Requested path
        path: PathBuf,
    },

    /// Report construction failed
    #[error("Report generation failed: {message}")]
    Report {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CovdownError {
    /// Create a parse error
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown-file error
    #[must_use]
    pub fn unknown_file(path: impl Into<PathBuf>) -> Self {
        Self::UnknownFile { path: path.into() }
    }

    /// Create a report error
    #[must_use]
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report {
            message: message.into(),
        }
    }
}
