//! The thematic domains of a monthly run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One monthly source extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Growth monitoring, children 5 to 6 years
    GrowthFiveToSix,
    /// Growth monitoring, children 0 to 5 years
    GrowthZeroToFive,
    /// Anaemia among pregnant women, lactating mothers and children
    Anaemia,
    /// Low birth weight, children 0 to 6 months
    LowBirthWeight,
    /// Gestational weight gain and ANC completion
    GestationalWeightGain,
    /// Adolescent girls, 14 to 18 years
    AdolescentGirls,
    /// Measuring efficiency, children 0 to 6 years
    MeasuringEfficiency,
    /// Home visits by anganwadi workers
    HomeVisit,
    /// Supplementary nutrition projections
    SnpProjections,
    /// Anganwadi centre operations summary
    AwcSummary,
}

impl Domain {
    /// Every domain, in cube join order (anchor first).
    pub const ALL: [Self; 10] = [
        Self::GrowthFiveToSix,
        Self::GrowthZeroToFive,
        Self::Anaemia,
        Self::LowBirthWeight,
        Self::GestationalWeightGain,
        Self::AdolescentGirls,
        Self::MeasuringEfficiency,
        Self::HomeVisit,
        Self::SnpProjections,
        Self::AwcSummary,
    ];

    /// Short identifier used in logs, errors and manifests.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::GrowthFiveToSix => "gm_5_6",
            Self::GrowthZeroToFive => "gm_0_5",
            Self::Anaemia => "anaemia",
            Self::LowBirthWeight => "lbw",
            Self::GestationalWeightGain => "gwg",
            Self::AdolescentGirls => "ag",
            Self::MeasuringEfficiency => "me",
            Self::HomeVisit => "hv",
            Self::SnpProjections => "snp",
            Self::AwcSummary => "awc",
        }
    }

    /// Lower-case file name prefix of the monthly extract.
    pub const fn file_prefix(&self) -> &'static str {
        match self {
            Self::GrowthFiveToSix => "(5_to_6_years)_growth_monitoring",
            Self::GrowthZeroToFive => "(0_to_5_years)_growth_monitoring",
            Self::Anaemia => "anaemia",
            Self::LowBirthWeight => "low_birth_weight",
            Self::GestationalWeightGain => "gestational_weight_gain",
            Self::AdolescentGirls => "adolescent_girls",
            Self::MeasuringEfficiency => "measuring_efficiency",
            Self::HomeVisit => "home_visit",
            Self::SnpProjections => "snp_projections",
            Self::AwcSummary => "awc_",
        }
    }

    /// Look a domain up by its [`key`](Self::key).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
