//! SNP Projections Analyzer
//!
//! Supplementary nutrition programme beneficiary projections: severe acute
//! malnutrition (SAM) and severe underweight (SUW) loads across the child age
//! bands, and the share of each beneficiary group.

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, finite_or_zero, ratio_field};
use crate::schema::{FieldSet, FieldSpec};
use poshan_data::HeaderRules;
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("snp_total_beneficiary", &["total_beneficiary"]),
    FieldSpec::exact("snp_total_pw", &["total_pw"]),
    FieldSpec::exact("snp_total_lm", &["total_lm"]),
    FieldSpec::exact("children_6m_3y", &["total_children_6m_to_3yr"]),
    FieldSpec::exact("children_3y_5y", &["total_children_3yr_to_5yr"]),
    FieldSpec::exact("children_5y_6y", &["total_children_5yr_to_6yr"]),
    FieldSpec::exact("sam_6m_3y", &["total_sam_children_6m_to_3yr"]),
    FieldSpec::exact(
        "sam_3y_5y",
        &["total_sam_children_3_yr_to_5_yr", "total_sam_children_3yr_to_5yr"],
    ),
    FieldSpec::exact("suw_6m_3y", &["total_suw_children_6m_to_3yr"]),
    FieldSpec::exact("suw_3y_6y", &["total_suw_children_3yr_to_6yr"]),
    FieldSpec::exact("sam_suw_6m_3y", &["total_sam_with_suw_children_6m_3y"]),
    FieldSpec::exact("sam_suw_3y_5y", &["total_sam_with_suw_children_3y_5y"]),
    FieldSpec::exact("snp_total_ag", &["adolescent_girls"]),
];

const DERIVED: &[&str] = &[
    "snp_children_total",
    "sam_total",
    "suw_total",
    "sam_suw_total",
    "sam_ratio",
    "suw_ratio",
    "sam_suw_ratio",
    "pw_share_pct",
    "lm_share_pct",
    "ag_share_pct",
    "children_share_pct",
];

/// Sum of `fields`, a missing or non-finite addend counting as 0.
fn filled_sum(fields: &[&str]) -> Expr {
    fields
        .iter()
        .map(|f| finite_or_zero(col(*f)))
        .reduce(|acc, e| acc + e)
        .unwrap_or_else(|| lit(0.0))
}

/// SAM and SUW burden and beneficiary mix.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnpAnalyzer;

impl DomainAnalyzer for SnpAnalyzer {
    fn domain(&self) -> Domain {
        Domain::SnpProjections
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
        let children = "snp_children_total";
        let beneficiaries = "snp_total_beneficiary";

        let result = data
            .with_columns([
                filled_sum(&["children_6m_3y", "children_3y_5y", "children_5y_6y"]).alias(children),
                filled_sum(&["sam_6m_3y", "sam_3y_5y"]).alias("sam_total"),
                filled_sum(&["suw_6m_3y", "suw_3y_6y"]).alias("suw_total"),
                filled_sum(&["sam_suw_6m_3y", "sam_suw_3y_5y"]).alias("sam_suw_total"),
            ])
            .with_columns([
                ratio_field("sam_ratio", "sam_total", children, Precision::Ratio),
                ratio_field("suw_ratio", "suw_total", children, Precision::Ratio),
                ratio_field("sam_suw_ratio", "sam_suw_total", children, Precision::Ratio),
                ratio_field("pw_share_pct", "snp_total_pw", beneficiaries, Precision::Percent),
                ratio_field("lm_share_pct", "snp_total_lm", beneficiaries, Precision::Percent),
                ratio_field("ag_share_pct", "snp_total_ag", beneficiaries, Precision::Percent),
                ratio_field("children_share_pct", children, beneficiaries, Precision::Percent),
            ]);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_snp_ratios_and_shares() {
        let raw = df!(
            "District" => ["North"],
            "Total Beneficiary" => [1000.0],
            "Total PW" => [100.0],
            "Total LM" => [150.0],
            "Total Children (6M to 3Yr)" => [300.0],
            "Total Children (3Yr to 5Yr)" => [250.0],
            "Total Children (5Yr to 6Yr)" => [50.0],
            "Total SAM Children (6M to 3Yr)" => [9.0],
            "Total SAM Children (3 Yr to 5 Yr)" => [3.0],
            "Total SUW Children (6M to 3Yr)" => [12.0],
            "Total SUW Children (3Yr to 6Yr)" => [None::<f64>],
            "Total SAM with SUW Children (6M-3Y)" => [1.0],
            "Total SAM with SUW Children (3Y-5Y)" => [2.0],
            "Adolescent Girls" => [150.0],
        )
        .unwrap();

        let df = SnpAnalyzer.analyze_frame(raw).unwrap();
        let value = |name: &str| df.column(name).unwrap().f64().unwrap().get(0).unwrap();

        assert_relative_eq!(value("snp_children_total"), 600.0);
        assert_relative_eq!(value("sam_ratio"), 0.02);
        // missing 3-6 year SUW count is treated as 0
        assert_relative_eq!(value("suw_total"), 12.0);
        assert_relative_eq!(value("suw_ratio"), 0.02);
        assert_relative_eq!(value("sam_suw_ratio"), 0.005);
        assert_relative_eq!(value("pw_share_pct"), 0.1);
        assert_relative_eq!(value("lm_share_pct"), 0.15);
        assert_relative_eq!(value("ag_share_pct"), 0.15);
        assert_relative_eq!(value("children_share_pct"), 0.6);
    }

    #[test]
    fn test_non_finite_cell_matches_empty_cell() {
        let raw = df!(
            "District" => ["NaN cell", "Empty cell"],
            "Total Beneficiary" => [1000.0, 1000.0],
            "Total PW" => [100.0, 100.0],
            "Total LM" => [150.0, 150.0],
            "Total Children (6M to 3Yr)" => [300.0, 300.0],
            "Total Children (3Yr to 5Yr)" => [250.0, 250.0],
            "Total Children (5Yr to 6Yr)" => [50.0, 50.0],
            "Total SAM Children (6M to 3Yr)" => [f64::INFINITY, 9.0],
            "Total SAM Children (3 Yr to 5 Yr)" => [3.0, 3.0],
            "Total SUW Children (6M to 3Yr)" => [12.0, 12.0],
            "Total SUW Children (3Yr to 6Yr)" => [Some(f64::NAN), None],
            "Total SAM with SUW Children (6M-3Y)" => [1.0, 1.0],
            "Total SAM with SUW Children (3Y-5Y)" => [2.0, 2.0],
            "Adolescent Girls" => [150.0, 150.0],
        )
        .unwrap();

        let df = SnpAnalyzer.analyze_frame(raw).unwrap();
        for name in DERIVED {
            let values = df.column(name).unwrap().f64().unwrap();
            assert!(
                values.into_iter().all(|v| v.is_some_and(f64::is_finite)),
                "{name} has a missing or non-finite value"
            );
        }

        let value = |name: &str, row: usize| df.column(name).unwrap().f64().unwrap().get(row).unwrap();
        assert_relative_eq!(value("suw_total", 0), value("suw_total", 1));
        assert_relative_eq!(value("suw_ratio", 0), 0.02);
        assert_relative_eq!(value("sam_total", 0), 3.0);
    }
}

