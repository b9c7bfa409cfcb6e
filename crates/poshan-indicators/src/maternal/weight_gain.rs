//! Gestational Weight Gain Analyzer
//!
//! ANC completion per visit, optimum weight gain and haemoglobin testing as of
//! the latest ANC. Headers abbreviate "No." so dots are stripped.

use crate::analyzer::DomainAnalyzer;
use crate::domain::Domain;
use crate::error::Result;
use crate::numeric::{Precision, ratio_field};
use crate::schema::{FieldSet, FieldSpec};
use poshan_data::HeaderRules;
use polars::prelude::*;

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::exact("total_pw", &["total_active_pregnant_women"]),
    FieldSpec::exact("pw_due_anc1", &["no_of_pw_due_anc_1"]),
    FieldSpec::exact("pw_completed_anc1", &["no_of_pw_completed_anc_1"]),
    FieldSpec::exact("pw_due_anc2", &["no_of_pw_due_anc_2"]),
    FieldSpec::exact("pw_completed_anc2", &["no_of_pw_completed_anc_2"]),
    FieldSpec::exact("pw_optimum_anc2", &["no_of_pw_gained_optimum_weight_in_anc_2"]).optional(),
    FieldSpec::exact("pw_due_anc3", &["no_of_pw_due_anc_3"]),
    FieldSpec::exact("pw_completed_anc3", &["no_of_pw_completed_anc_3"]),
    FieldSpec::exact("pw_optimum_anc3", &["no_of_pw_gained_optimum_weight_in_anc_3"]).optional(),
    FieldSpec::exact("pw_due_anc4", &["no_of_pw_due_anc_4"]),
    FieldSpec::exact("pw_completed_anc4", &["no_of_pw_completed_anc_4"]),
    FieldSpec::exact("pw_optimum_anc4", &["no_of_pw_gained_optimum_weight_in_anc_4"]).optional(),
    FieldSpec::exact(
        "pw_optimum_latest",
        &["total_no_of_pw_gained_optimum_weight_as_per_latest_anc"],
    ),
    FieldSpec::exact("pw_hb_measured", &["total_haemoglobin_measured_as_per_latest_anc"]),
    FieldSpec::exact("pw_anaemic_latest", &["total_anaemic_as_per_latest_anc"]),
];

const DERIVED: &[&str] = &[
    "anc1_completion_pct",
    "anc2_completion_pct",
    "anc3_completion_pct",
    "anc4_completion_pct",
    "optimum_wg_latest_pct",
    "pw_hb_measured_pct",
    "pw_anaemia_latest_pct",
];

/// Antenatal care completion and weight gain of pregnant women.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightGainAnalyzer;

impl DomainAnalyzer for WeightGainAnalyzer {
    fn domain(&self) -> Domain {
        Domain::GestationalWeightGain
    }

    fn header_rules(&self) -> HeaderRules {
        HeaderRules::STRIP_DOTS
    }

    fn schema(&self) -> &'static [FieldSpec] {
        SCHEMA
    }

    fn derived_fields(&self) -> &'static [&'static str] {
        DERIVED
    }

    fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
        let p = Precision::Percent;
        Ok(data.with_columns([
            ratio_field("anc1_completion_pct", "pw_completed_anc1", "pw_due_anc1", p),
            ratio_field("anc2_completion_pct", "pw_completed_anc2", "pw_due_anc2", p),
            ratio_field("anc3_completion_pct", "pw_completed_anc3", "pw_due_anc3", p),
            ratio_field("anc4_completion_pct", "pw_completed_anc4", "pw_due_anc4", p),
            ratio_field("optimum_wg_latest_pct", "pw_optimum_latest", "total_pw", p),
            ratio_field("pw_hb_measured_pct", "pw_hb_measured", "total_pw", p),
            ratio_field("pw_anaemia_latest_pct", "pw_anaemic_latest", "pw_hb_measured", p),
        ]))
    }
}
