//! Error types for domain analysis.

use crate::domain::Domain;
use poshan_data::DataError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Result type for domain analysis.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Errors that abort the analysis of one domain.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Source file has an extension the loader does not handle
    #[error("{domain}: unsupported source format '{extension}'")]
    UnsupportedFormat {
        /// Domain being analyzed
        domain: Domain,
        /// Offending extension
        extension: String,
    },

    /// Source file is missing or has no data rows
    #[error("{domain}: empty source ({detail})")]
    EmptySource {
        /// Domain being analyzed
        domain: Domain,
        /// Path and reason
        detail: String,
    },

    /// A field the indicator formulas need is not in the source
    #[error("{domain}: missing field '{field}'")]
    MissingField {
        /// Domain being analyzed
        domain: Domain,
        /// Internal field name
        field: String,
    },

    /// Any other loading or normalization failure
    #[error("{domain}: {source}")]
    Data {
        /// Domain being analyzed
        domain: Domain,
        /// Underlying error
        source: DataError,
    },

    /// Polars error while computing indicators
    #[error("{domain}: polars error: {source}")]
    Compute {
        /// Domain being analyzed
        domain: Domain,
        /// Underlying error
        source: PolarsError,
    },

    /// Polars error outside a domain analysis
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl DomainError {
    /// Attach `domain` to a data-layer error, keeping the fatal kinds distinct.
    pub fn from_data(domain: Domain, err: DataError) -> Self {
        match err {
            DataError::UnsupportedFormat(extension) => Self::UnsupportedFormat { domain, extension },
            DataError::EmptySource { path, reason } => Self::EmptySource {
                domain,
                detail: format!("{}: {}", path.display(), reason),
            },
            DataError::MissingColumn(field) => Self::MissingField { domain, field },
            source => Self::Data { domain, source },
        }
    }

    /// Attach `domain` to a polars error raised while analyzing it.
    pub const fn compute(domain: Domain, source: PolarsError) -> Self {
        Self::Compute { domain, source }
    }

    /// Build a [`DomainError::MissingField`].
    pub fn missing_field(domain: Domain, field: &str) -> Self {
        Self::MissingField {
            domain,
            field: field.to_string(),
        }
    }

    /// Domain the error belongs to, when known.
    pub const fn domain(&self) -> Option<Domain> {
        match self {
            Self::UnsupportedFormat { domain, .. }
            | Self::EmptySource { domain, .. }
            | Self::MissingField { domain, .. }
            | Self::Data { domain, .. }
            | Self::Compute { domain, .. } => Some(*domain),
            Self::Polars(_) => None,
        }
    }
}
