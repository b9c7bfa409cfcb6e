//! Anaemia Analyzer
//!
//! The anaemia extract repeats its `Anaemic` header once per cohort; after
//! disambiguation the cohorts read `anaemic`, `anaemic.1` and `anaemic.2` in
//! source order (pregnant women, lactating mothers, children).

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, ratio_field};
use crate::schema::{FieldSet, FieldSpec};
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("hb_measured_pw", &["haemoglobin_measured_of_pw"]),
    FieldSpec::exact("anaemic_pw", &["anaemic"]),
    FieldSpec::exact("hb_measured_lm", &["haemoglobin_measured_of_lm"]),
    FieldSpec::exact("anaemic_lm", &["anaemic.1"]),
    FieldSpec::exact(
        "hb_measured_child",
        &[
            "haemoglobin_measured_of_children_6months_-_5_years",
            "haemoglobin_measured_of_children_6_months_-_5_years",
        ],
    ),
    FieldSpec::exact("anaemic_child", &["anaemic.2"]),
];

const DERIVED: &[&str] = &["pw_anaemia_rate", "lm_anaemia_rate", "child_anaemia_rate"];

/// Anaemia prevalence among pregnant women, lactating mothers and children.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnaemiaAnalyzer;

impl DomainAnalyzer for AnaemiaAnalyzer {
    fn domain(&self) -> Domain {
        Domain::Anaemia
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        Ok(data.with_columns([
            ratio_field("pw_anaemia_rate", "anaemic_pw", "hb_measured_pw", Precision::Percent),
            ratio_field("lm_anaemia_rate", "anaemic_lm", "hb_measured_lm", Precision::Percent),
            ratio_field(
                "child_anaemia_rate",
                "anaemic_child",
                "hb_measured_child",
                Precision::Percent,
            ),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use approx::assert_relative_eq;

    #[test]
    fn test_anaemia_rates_follow_column_order() {
        let raw = df!(
            "District" => ["North", "South"],
            "Haemoglobin measured of PW" => [100.0, 0.0],
            "Anaemic" => [25.0, 0.0],
            "Haemoglobin measured of LM" => [50.0, 40.0],
            "Anaemic.1" => [10.0, 8.0],
            "Haemoglobin measured of children 6months - 5 years" => [200.0, 10.0],
            "Anaemic.2" => [30.0, 1.0],
        )
        .unwrap();

        let df = AnaemiaAnalyzer.analyze_frame(raw).unwrap();
        let pw = df.column("pw_anaemia_rate").unwrap().f64().unwrap();
        let lm = df.column("lm_anaemia_rate").unwrap().f64().unwrap();
        let child = df.column("child_anaemia_rate").unwrap().f64().unwrap();

        assert_relative_eq!(pw.get(0).unwrap(), 0.25);
        assert_relative_eq!(pw.get(1).unwrap(), 0.0);
        assert_relative_eq!(lm.get(0).unwrap(), 0.2);
        assert_relative_eq!(child.get(0).unwrap(), 0.15);
        assert_relative_eq!(child.get(1).unwrap(), 0.1);
    }

    #[test]
    fn test_missing_child_cohort() {
        let raw = df!(
            "District" => ["North"],
            "Haemoglobin measured of PW" => [100.0],
            "Anaemic" => [25.0],
            "Haemoglobin measured of LM" => [50.0],
            "Anaemic.1" => [10.0],
        )
        .unwrap();

        let err = AnaemiaAnalyzer.analyze_frame(raw).unwrap_err();
        assert!(
            matches!(err, DomainError::MissingField { ref field, .. } if field == "hb_measured_child")
        );
    }
}
