//! Header normalization.
//!
//! Monthly extracts arrive with natural-language headers such as
//! `"Severely Stunted (%)"`. Every label is pushed through the same ordered
//! pipeline so that per-domain schemas can match on the literal normalized
//! form (`severely_stunted_pct`):
//!
//! 1. trim surrounding whitespace
//! 2. lower-case
//! 3. replace whitespace runs with `_`
//! 4. strip `(` and `)`
//! 5. replace `%` with `pct`
//! 6. optionally strip `.` ([`HeaderRules::strip_dots`])
//! 7. optionally map `-` to `_` ([`HeaderRules::dashes_to_underscores`])
//! 8. collapse repeated underscores
//!
//! The order is part of the contract: schemas are written against its output.

use crate::error::{DataError, Result};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("valid regex"));

/// Domain-specific additions to the base normalization pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeaderRules {
    /// Remove `.` (e.g. `No. of PW` → `no_of_pw`)
    pub strip_dots: bool,
    /// Map `-` to `_` (e.g. `0-6M` → `0_6m`)
    pub dashes_to_underscores: bool,
}

impl HeaderRules {
    /// Base pipeline only.
    pub const BASE: Self = Self {
        strip_dots: false,
        dashes_to_underscores: false,
    };

    /// Base pipeline plus dot stripping.
    pub const STRIP_DOTS: Self = Self {
        strip_dots: true,
        dashes_to_underscores: false,
    };

    /// Base pipeline plus dash mapping.
    pub const DASHES: Self = Self {
        strip_dots: false,
        dashes_to_underscores: true,
    };
}

/// Normalize a single header label.
pub fn normalize_label(label: &str, rules: HeaderRules) -> String {
    let lowered = label.trim().to_lowercase();
    let mut label = WHITESPACE_RUN.replace_all(&lowered, "_").into_owned();

    label.retain(|c| c != '(' && c != ')');
    label = label.replace('%', "pct");
    if rules.strip_dots {
        label.retain(|c| c != '.');
    }
    if rules.dashes_to_underscores {
        label = label.replace('-', "_");
    }

    UNDERSCORE_RUN.replace_all(&label, "_").into_owned()
}

/// Normalize every column label of `df`; values are untouched.
///
/// Fails with [`DataError::DuplicateHeader`] when two labels collapse onto the
/// same normalized form, since a silent overwrite would feed the wrong column
/// into a rename.
pub fn normalize_headers(mut df: DataFrame, rules: HeaderRules) -> Result<DataFrame> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_label(name.as_str(), rules))
        .collect();

    let mut seen = HashSet::with_capacity(normalized.len());
    for label in &normalized {
        if !seen.insert(label.as_str()) {
            return Err(DataError::DuplicateHeader(label.clone()));
        }
    }

    df.set_column_names(normalized.iter().map(String::as_str))?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("District", "district")]
    #[case("  Severely Stunted (%) ", "severely_stunted_pct")]
    #[case("Severely Stunted (N)", "severely_stunted_n")]
    #[case("Measurement Efficiency (%)", "measurement_efficiency_pct")]
    #[case(
        "Total active children measured (Height & Weight) for the month",
        "total_active_children_measured_height_&_weight_for_the_month"
    )]
    #[case("AWW completed 80% of ME", "aww_completed_80pct_of_me")]
    #[case("Anaemic.1", "anaemic.1")]
    #[case("Total   Active\tAG", "total_active_ag")]
    fn test_base_rules(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(raw, HeaderRules::BASE), expected);
    }

    #[test]
    fn test_strip_dots() {
        assert_eq!(
            normalize_label("No. of PW due ANC 1", HeaderRules::STRIP_DOTS),
            "no_of_pw_due_anc_1"
        );
    }

    #[rstest]
    #[case("Low Birth Weight Children 0-6M", "low_birth_weight_children_0_6m")]
    #[case("Total SAM with SUW Children (6M-3Y)", "total_sam_with_suw_children_6m_3y")]
    #[case("Total SAM Children 3 Yr - 5 Yr", "total_sam_children_3_yr_5_yr")]
    fn test_dash_rules(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(raw, HeaderRules::DASHES), expected);
    }

    #[test]
    fn test_normalize_headers_renames_columns_only() {
        let df = df!(
            "District Name" => ["a"],
            "Total (N)" => [1.0],
        )
        .unwrap();

        let out = normalize_headers(df, HeaderRules::BASE).unwrap();
        let names: Vec<&str> = out.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["district_name", "total_n"]);
        assert_eq!(out.column("total_n").unwrap().f64().unwrap().get(0), Some(1.0));
    }

    #[test]
    fn test_normalize_headers_rejects_collisions() {
        let df = df!(
            "Total AWC" => [1.0],
            "total  awc" => [2.0],
        )
        .unwrap();

        let err = normalize_headers(df, HeaderRules::BASE).unwrap_err();
        assert!(matches!(err, DataError::DuplicateHeader(label) if label == "total_awc"));
    }

    proptest! {
        #[test]
        fn prop_normalize_label_is_idempotent(
            raw in "[ A-Za-z0-9()%._&,\\-\t]{0,40}",
            strip_dots in any::<bool>(),
            dashes_to_underscores in any::<bool>(),
        ) {
            let rules = HeaderRules { strip_dots, dashes_to_underscores };
            let once = normalize_label(&raw, rules);
            prop_assert_eq!(normalize_label(&once, rules), once);
        }
    }
}
