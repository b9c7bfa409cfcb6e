//! Growth Monitoring Analyzer
//!
//! Both age bands share one extract layout and one set of formulas; only the
//! field suffix differs (`_0_5`, `_5_6`), which keeps the two bands' columns
//! distinct in the cube.
//!
//! - `stunting_total_pct = severe% + moderate%`
//! - `underweight_total_pct = severe% + moderate%`
//! - `measurement_coverage_pct = measured / total * 100`
//! - `normal_stunting_ratio = normal% / stunting_total%`
//! - `normal_underweight_ratio = normal% / underweight_total%`

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, finite_or_zero, ratio, rounded};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

macro_rules! growth_schema {
    ($suffix:literal) => {
        &[
            FieldSpec::exact(
                concat!("total_children", $suffix),
                &["total_active_children_registered_in_the_awc_for_the_month"],
            ),
            FieldSpec::exact(
                concat!("measured_children", $suffix),
                &[
                    "total_active_children_measured_height_&_weight_for_the_month",
                    "total_active_children_measured_height_weight_for_the_month",
                ],
            ),
            FieldSpec::exact(concat!("measurement_efficiency", $suffix), &["measurement_efficiency_pct"])
                .optional(),
            FieldSpec::exact(concat!("stunted_severe_n", $suffix), &["severely_stunted_n"]).optional(),
            FieldSpec::exact(concat!("stunted_severe_pct", $suffix), &["severely_stunted_pct"]),
            FieldSpec::exact(concat!("stunted_moderate_n", $suffix), &["moderately_stunted_n"])
                .optional(),
            FieldSpec::exact(concat!("stunted_moderate_pct", $suffix), &["moderately_stunted_pct"]),
            FieldSpec::exact(concat!("stunted_normal_n", $suffix), &["not_stunted_n"]).optional(),
            FieldSpec::exact(concat!("stunted_normal_pct", $suffix), &["not_stunted_pct"]),
            FieldSpec::exact(concat!("underweight_severe_n", $suffix), &["severely_underweight_n"])
                .optional(),
            FieldSpec::exact(concat!("underweight_severe_pct", $suffix), &["severely_underweight_pct"]),
            FieldSpec::exact(concat!("underweight_moderate_n", $suffix), &["moderately_underweight_n"])
                .optional(),
            FieldSpec::exact(
                concat!("underweight_moderate_pct", $suffix),
                &["moderately_underweight_pct"],
            ),
            FieldSpec::exact(concat!("underweight_normal_n", $suffix), &["not_underweight_n"])
                .optional(),
            FieldSpec::exact(concat!("underweight_normal_pct", $suffix), &["not_underweight_pct"]),
        ]
    };
}

macro_rules! growth_derived {
    ($suffix:literal) => {
        &[
            concat!("stunting_total_pct", $suffix),
            concat!("underweight_total_pct", $suffix),
            concat!("measurement_coverage_pct", $suffix),
            concat!("normal_stunting_ratio", $suffix),
            concat!("normal_underweight_ratio", $suffix),
        ]
    };
}

const SCHEMA_0_5: &[FieldSpec] = growth_schema!("_0_5");
const SCHEMA_5_6: &[FieldSpec] = growth_schema!("_5_6");
const DERIVED_0_5: &[&str] = growth_derived!("_0_5");
const DERIVED_5_6: &[&str] = growth_derived!("_5_6");

/// Age band covered by a growth monitoring extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// Children 0 to 5 years
    ZeroToFive,
    /// Children 5 to 6 years
    FiveToSix,
}

impl AgeBand {
    /// Suffix appended to every field of this band.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::ZeroToFive => "_0_5",
            Self::FiveToSix => "_5_6",
        }
    }
}

/// Growth monitoring analyzer for one age band.
#[derive(Debug, Clone, Copy)]
pub struct GrowthMonitoringAnalyzer {
    band: AgeBand,
}

impl GrowthMonitoringAnalyzer {
    /// Create an analyzer for `band`.
    pub const fn new(band: AgeBand) -> Self {
        Self { band }
    }

    /// Age band handled by this analyzer.
    pub const fn band(&self) -> AgeBand {
        self.band
    }

    fn field(&self, name: &str) -> String {
        format!("{}{}", name, self.band.suffix())
    }

    fn total_of(&self, total: &str, severe: &str, moderate: &str) -> Expr {
        let sum = col(self.field(severe)) + col(self.field(moderate));
        rounded(finite_or_zero(sum), Precision::Percent).alias(self.field(total))
    }
}

impl DomainAnalyzer for GrowthMonitoringAnalyzer {
    fn domain(&self) -> Domain {
        match self.band {
            AgeBand::ZeroToFive => Domain::GrowthZeroToFive,
            AgeBand::FiveToSix => Domain::GrowthFiveToSix,
        }
    }

    fn schema(&self) -> &'static [FieldSpec] {
        match self.band {
            AgeBand::ZeroToFive => SCHEMA_0_5,
            AgeBand::FiveToSix => SCHEMA_5_6,
        }
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        match self.band {
            AgeBand::ZeroToFive => DERIVED_0_5,
            AgeBand::FiveToSix => DERIVED_5_6,
        }
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        // Ratios read the rounded totals, so totals go in a first pass.
        let coverage = ratio(
            col(self.field("measured_children")),
            col(self.field("total_children")),
        ) * lit(100.0);

        let result = data
            .with_columns([
                self.total_of("stunting_total_pct", "stunted_severe_pct", "stunted_moderate_pct"),
                self.total_of(
                    "underweight_total_pct",
                    "underweight_severe_pct",
                    "underweight_moderate_pct",
                ),
                rounded(coverage, Precision::Percent).alias(self.field("measurement_coverage_pct")),
            ])
            .with_columns([
                rounded(
                    ratio(
                        col(self.field("stunted_normal_pct")),
                        col(self.field("stunting_total_pct")),
                    ),
                    Precision::Percent,
                )
                .alias(self.field("normal_stunting_ratio")),
                rounded(
                    ratio(
                        col(self.field("underweight_normal_pct")),
                        col(self.field("underweight_total_pct")),
                    ),
                    Precision::Percent,
                )
                .alias(self.field("normal_underweight_ratio")),
            ]);

        Ok(result)
    }
}
