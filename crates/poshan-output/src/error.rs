//! Error types for warehouse output.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for warehouse operations.
pub type Result<T> = std::result::Result<T, WarehouseError>;

/// Errors that can occur while writing or reading warehouse artifacts.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// `Warehouse::init` has not been called for this root
    #[error("warehouse not initialized at {}", .0.display())]
    NotInitialized(PathBuf),

    /// Month tag or table name cannot be used as a path component
    #[error("invalid artifact name: {0}")]
    InvalidName(String),

    /// No cube has been written for the month
    #[error("no cube for month {0}")]
    MissingCube(String),

    /// Reading a persisted cube failed
    #[error("Data error: {0}")]
    Data(#[from] poshan_data::DataError),

    /// Persisted cube is not a valid cube
    #[error("Cube error: {0}")]
    Cube(#[from] poshan_cube::CubeError),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
