//! Error types for the monthly pipeline.

use poshan_cube::CubeError;
use poshan_data::DataError;
use poshan_indicators::DomainError;
use poshan_output::WarehouseError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Base directory for month folders does not exist
    #[error("base directory not found: {}", .0.display())]
    MissingBase(PathBuf),

    /// Base directory has no `YYYY-MM` folder
    #[error("no month folders found under {}", .0.display())]
    NoMonthFolders(PathBuf),

    /// Month tag is not a valid `YYYY-MM`
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// Configuration file could not be read
    #[error("config {}: {source}", path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: serde_json::Error,
    },

    /// Enrichment step failed
    #[error("enrichment '{name}' failed: {reason}")]
    Enrichment {
        /// Enricher name
        name: String,
        /// Failure description
        reason: String,
    },

    /// Loading or cleaning error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Domain analysis error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Cube assembly error
    #[error(transparent)]
    Cube(#[from] CubeError),

    /// Warehouse error
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
