//! Measuring Efficiency Analyzer
//!
//! `aww_80pct_me_share` divides each district's count by the column total of
//! the same table, so its value depends on every row loaded for the month.

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, ratio, ratio_field, rounded};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("me_children_total", &["total_active_children"]),
    FieldSpec::exact("me_children_measured", &["total_active_children_measured"]),
    FieldSpec::exact("me_children_measured_pct", &["pct_children_measured"]).optional(),
    FieldSpec::exact("aww_completed_80pct_me", &["aww_completed_80pct_of_me"]),
];

const DERIVED: &[&str] = &["me_coverage_pct", "aww_80pct_me_share"];

/// Measurement coverage of children 0-6 years.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasuringEfficiencyAnalyzer;

impl DomainAnalyzer for MeasuringEfficiencyAnalyzer {
    fn domain(&self) -> Domain {
        Domain::MeasuringEfficiency
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        let threshold = col("aww_completed_80pct_me");
        Ok(data.with_columns([
            ratio_field(
                "me_coverage_pct",
                "me_children_measured",
                "me_children_total",
                Precision::Percent,
            ),
            rounded(ratio(threshold.clone(), threshold.sum()), Precision::Percent)
                .alias("aww_80pct_me_share"),
        ]))
    }
}
