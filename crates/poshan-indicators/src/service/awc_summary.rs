//! AWC Summary Analyzer
//!
//! Operational status of anganwadi centres.
//!
//! - `active_awc_pct`, `inactive_awc_pct` over `total_awc`
//! - `awc_churn_rate = (new + inactive during month) / total_awc`
//! - `awc_readiness_score = active% * 0.8 + (1 - inactive%) * 0.2`

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, ratio, ratio_field, rounded};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;

/// Weight of the active share in the readiness score.
pub const ACTIVE_WEIGHT: f64 = 0.8;

/// Weight of the complement of the inactive share in the readiness score.
pub const INACTIVE_WEIGHT: f64 = 0.2;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("total_awc", &["total_awc"]),
    FieldSpec::exact("active_awc", &["total_active_awc"]),
    FieldSpec::exact("inactive_awc", &["total_inactive_awc"]),
    FieldSpec::exact("new_awc_month", &["newly_added_awc_during_month"]),
    FieldSpec::exact("inactive_awc_month", &["inactive_awc_during_month"]),
];

const DERIVED: &[&str] = &[
    "active_awc_pct",
    "inactive_awc_pct",
    "awc_churn_rate",
    "awc_readiness_score",
];

/// Centre activity, churn and readiness.
#[derive(Debug, Clone, Copy, Default)]
pub struct AwcSummaryAnalyzer;

impl DomainAnalyzer for AwcSummaryAnalyzer {
    fn domain(&self) -> Domain {
        Domain::AwcSummary
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        let churn = ratio(
            col("new_awc_month") + col("inactive_awc_month"),
            col("total_awc"),
        );

        let result = data
            .with_columns([
                ratio_field("active_awc_pct", "active_awc", "total_awc", Precision::Percent),
                ratio_field("inactive_awc_pct", "inactive_awc", "total_awc", Precision::Percent),
                rounded(churn, Precision::Ratio).alias("awc_churn_rate"),
            ])
            .with_column(
                rounded(
                    col("active_awc_pct") * lit(ACTIVE_WEIGHT)
                        + (lit(1.0) - col("inactive_awc_pct")) * lit(INACTIVE_WEIGHT),
                    Precision::Ratio,
                )
                .alias("awc_readiness_score"),
            );

        Ok(result)
    }
}
