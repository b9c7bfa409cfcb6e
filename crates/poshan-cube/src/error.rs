//! Error types for cube assembly.

use poshan_indicators::Domain;
use thiserror::Error;

/// Result type for cube operations.
pub type Result<T> = std::result::Result<T, CubeError>;

/// Errors that can occur while assembling or reading a cube.
#[derive(Debug, Error)]
pub enum CubeError {
    /// No table was supplied for a domain
    #[error("no table for domain {0}")]
    MissingDomain(Domain),

    /// A domain table lacks the district key column
    #[error("{0}: table has no district column")]
    MissingKey(Domain),

    /// Two domains emit the same field name
    #[error("{domain}: column '{column}' already present in the cube")]
    ColumnCollision {
        /// Domain whose join would overwrite the column
        domain: Domain,
        /// Colliding column name
        column: String,
    },

    /// A requested column is not in the cube
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}
