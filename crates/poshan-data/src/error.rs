//! Error types for source loading and table normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or normalizing a source table.
#[derive(Debug, Error)]
pub enum DataError {
    /// File extension is not one of the supported source formats
    #[error("Unsupported format: '{0}'")]
    UnsupportedFormat(String),

    /// Source file is absent or yields no data rows
    #[error("Empty source {}: {reason}", path.display())]
    EmptySource {
        /// Path that was read
        path: PathBuf,
        /// Why the source was considered empty
        reason: String,
    },

    /// A column the caller asked for is not in the table
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Two labels normalize to the same header
    #[error("Duplicate header after normalization: {0}")]
    DuplicateHeader(String),

    /// Delimited parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet parsing error
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Build an [`DataError::EmptySource`] for `path`.
    pub fn empty_source(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::EmptySource {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
