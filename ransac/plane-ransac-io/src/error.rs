//! Error types for point file I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for point file I/O.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while reading point files or writing models.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The input has no threshold line.
    #[error("missing threshold line")]
    MissingThreshold,

    /// A line could not be parsed.
    #[error("invalid content at line {line}: {message}")]
    InvalidContent {
        /// 1-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error for the given line.
    #[must_use]
    pub fn invalid_content(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            line,
            message: message.into(),
        }
    }
}
