//! Error handling for the trial report pipeline.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow_schema::ArrowError;
use thiserror::Error;

/// Specialized error type for loading and analysing clinical-trial data
#[derive(Debug, Error)]
pub enum TrialError {
    /// The input path is missing or could not be read
    #[error("Cannot access {}: {source}", .path.display())]
    FileAccess {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// The file content is not valid tabular data
    #[error("Failed to parse {}: {message}", .path.display())]
    Parse {
        /// Path that was being parsed
        path: PathBuf,
        /// Description of the parse failure
        message: String,
    },

    /// A component referenced a column absent from the loaded schema
    #[error("Column '{column}' not found in dataset")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// A column could not be interpreted as the type a component needs
    #[error("Column '{column}' cannot be read as {expected}")]
    InvalidDataType {
        /// Name of the offending column
        column: String,
        /// Human-readable name of the expected type
        expected: String,
    },

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by an Arrow compute kernel
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrialError {
    /// Create a file access error for `path`
    pub fn file_access(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error for `path`
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    #[must_use]
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }

    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    #[must_use]
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

/// Result type for trial report operations
pub type Result<T> = std::result::Result<T, TrialError>;
