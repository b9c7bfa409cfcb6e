//! Low Birth Weight Analyzer

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, ratio_field};
use crate::schema::{FieldSet, FieldSpec};
use poshan_data::HeaderRules;
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("total_children_0_6m", &["total_children_0_6m"]),
    FieldSpec::exact(
        "lbw_children_0_6m",
        &["low_birth_weight_children_0_6m", "lbw_children_0_6m"],
    ),
];

const DERIVED: &[&str] = &["lbw_rate_pct"];

/// Share of children 0-6 months born with low birth weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowBirthWeightAnalyzer;

impl DomainAnalyzer for LowBirthWeightAnalyzer {
    fn domain(&self) -> Domain {
        Domain::LowBirthWeight
    }

    fn header_rules(&self) -> HeaderRules {
        HeaderRules::DASHES
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        Ok(data.with_column(ratio_field(
            "lbw_rate_pct",
            "lbw_children_0_6m",
            "total_children_0_6m",
            Precision::Percent,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lbw_rate_with_dashed_headers() {
        let raw = df!(
            "District" => ["North", "South"],
            "Total Children 0-6M" => [400.0, 0.0],
            "Low Birth Weight Children 0-6M" => [36.0, 3.0],
        )
        .unwrap();

        let df = LowBirthWeightAnalyzer.analyze_frame(raw).unwrap();
        let rate = df.column("lbw_rate_pct").unwrap().f64().unwrap();
        assert_relative_eq!(rate.get(0).unwrap(), 0.09);
        assert_relative_eq!(rate.get(1).unwrap(), 0.0);
    }
}
