//! Home Visit Analyzer
//!
//! Home visit headers embed the reporting window
//! (`total_aww_between_01_-_30_nov,_2025`), so fields match by prefix.

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, finite_or_zero, ratio_field, rounded};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::prefix("total_aww", "total_aww_between"),
    FieldSpec::prefix("target_visits", "total_targeted_visits_between").optional(),
    FieldSpec::prefix("visits_made", "total_visits_made_between").optional(),
    FieldSpec::prefix("visit_coverage_pct", "pct_of_visits_made_between"),
    FieldSpec::prefix("aww_60pct_hv", "aww_completed_60pct_hv_between"),
];

const DERIVED: &[&str] = &["visit_coverage_pct", "aww_60pct_hv_pct"];

/// Home visit coverage by anganwadi workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeVisitAnalyzer;

impl DomainAnalyzer for HomeVisitAnalyzer {
    fn domain(&self) -> Domain {
        Domain::HomeVisit
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        // Coverage is already a percentage in the source; only coerce it.
        Ok(data.with_columns([
            rounded(finite_or_zero(col("visit_coverage_pct")), Precision::Percent)
                .alias("visit_coverage_pct"),
            ratio_field("aww_60pct_hv_pct", "aww_60pct_hv", "total_aww", Precision::Percent),
        ]))
    }
}
