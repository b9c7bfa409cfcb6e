//! Optional post-clean enrichment of the ETL tables.
//!
//! The ETL stage asks an [`Enricher`] once whether it is available. An
//! unavailable enricher is skipped; a failing one is logged and the cleaned
//! tables are written unchanged.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Cleaned tables keyed by file stem.
pub type Tables = BTreeMap<String, DataFrame>;

/// A pluggable enrichment step.
pub trait Enricher: Debug {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Whether the step can run in this environment.
    fn is_available(&self) -> bool;

    /// Return enriched copies of `tables`.
    fn enrich(&self, tables: &Tables) -> Result<Tables>;
}

/// Enricher that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    fn name(&self) -> &str {
        "none"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn enrich(&self, tables: &Tables) -> Result<Tables> {
        Ok(tables.clone())
    }
}

/// Adds a constant `month` column to every table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthStamp {
    month: String,
}

impl MonthStamp {
    /// Column added by this enricher.
    pub const COLUMN: &'static str = "month";

    /// Stamp tables with `month`.
    pub fn new(month: impl Into<String>) -> Self {
        Self {
            month: month.into(),
        }
    }
}

impl Enricher for MonthStamp {
    fn name(&self) -> &str {
        "month-stamp"
    }

    fn is_available(&self) -> bool {
        !self.month.is_empty()
    }

    fn enrich(&self, tables: &Tables) -> Result<Tables> {
        tables
            .iter()
            .map(|(name, table)| {
                if table.column(Self::COLUMN).is_ok() {
                    return Err(PipelineError::Enrichment {
                        name: self.name().to_string(),
                        reason: format!("table '{name}' already has a '{}' column", Self::COLUMN),
                    });
                }
                let stamped = table
                    .clone()
                    .lazy()
                    .with_column(lit(self.month.as_str()).alias(Self::COLUMN))
                    .collect()?;
                Ok((name.clone(), stamped))
            })
            .collect()
    }
}
