//! Adolescent Girls Analyzer
//!
//! Nutrition status of adolescent girls 14-18 years. Measured coverage is
//! taken from the source when it reports one and computed otherwise.

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::{DomainError, Result};
use crate::numeric::{Precision, finite_or_zero, ratio_field, rounded};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("total_ag", &["total_active_ag"]),
    FieldSpec::exact(
        "ag_measured",
        &["active_ag_measured_height_&_weight", "active_ag_measured_height_weight"],
    )
    .optional(),
    FieldSpec::exact("ag_measured_pct", &["pct_of_ag_measured"]).optional(),
    FieldSpec::exact("ag_severely_thin", &["severely_thin"]),
    FieldSpec::exact("ag_thin", &["thin"]),
    FieldSpec::exact("ag_normal", &["normal"]).optional(),
    FieldSpec::exact("ag_overweight", &["overweight"]).optional(),
    FieldSpec::exact("ag_obese", &["obese"]).optional(),
    FieldSpec::exact("ag_hb_measured", &["haemoglobin_measured"]),
    FieldSpec::exact("ag_anaemic", &["anaemic"]),
];

const DERIVED: &[&str] = &[
    "ag_measured_pct",
    "ag_underweight",
    "ag_underweight_pct",
    "ag_anaemia_rate",
];

/// Thinness and anaemia among adolescent girls.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdolescentGirlsAnalyzer;

impl DomainAnalyzer for AdolescentGirlsAnalyzer {
    fn domain(&self) -> Domain {
        Domain::AdolescentGirls
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, fields: &FieldSet) -> Result<LazyFrame> {
        let measured_pct = if fields.contains("ag_measured_pct") {
            rounded(finite_or_zero(col("ag_measured_pct")), Precision::Percent)
                .alias("ag_measured_pct")
        } else if fields.contains("ag_measured") {
            ratio_field("ag_measured_pct", "ag_measured", "total_ag", Precision::Percent)
        } else {
            return Err(DomainError::missing_field(self.domain(), "ag_measured"));
        };

        let underweight =
            finite_or_zero(col("ag_severely_thin")) + finite_or_zero(col("ag_thin"));

        let result = data
            .with_columns([measured_pct, underweight.alias("ag_underweight")])
            .with_columns([
                ratio_field("ag_underweight_pct", "ag_underweight", "total_ag", Precision::Percent),
                ratio_field("ag_anaemia_rate", "ag_anaemic", "ag_hb_measured", Precision::Percent),
            ]);

        Ok(result)
    }
}
