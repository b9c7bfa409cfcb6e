//! Named model feature subsets of the cube.

use crate::assemble::Cube;
use crate::error::{CubeError, Result};
use poshan_data::DISTRICT;
use polars::prelude::*;
use serde::Serialize;

/// Feature columns and target column consumed by one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureSet {
    /// Model name
    pub name: &'static str,
    /// Feature columns, in model input order
    pub features: &'static [&'static str],
    /// Target column
    pub target: &'static str,
}

impl FeatureSet {
    /// Low birth weight from maternal and service indicators.
    pub const LBW: Self = Self {
        name: "lbw",
        features: &[
            "pw_anaemia_rate",
            "optimum_wg_latest_pct",
            "pw_hb_measured_pct",
            "measurement_efficiency_5_6",
            "visit_coverage_pct",
            "sam_ratio",
            "suw_ratio",
        ],
        target: "lbw_rate_pct",
    };

    /// Stunting (5-6 years) from SNP, measurement, centre and service indicators.
    pub const STUNTING: Self = Self {
        name: "stunting",
        features: &[
            "measurement_efficiency_5_6",
            "sam_ratio",
            "suw_ratio",
            "active_awc_pct",
            "visit_coverage_pct",
            "lbw_rate_pct",
        ],
        target: "stunting_total_pct_5_6",
    };

    /// Every known feature set.
    pub const ALL: [Self; 2] = [Self::LBW, Self::STUNTING];

    /// Look a feature set up by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|set| set.name == name)
    }

    /// `district`, the features and the target, for rows where none of them
    /// is null.
    pub fn select(&self, cube: &Cube) -> Result<DataFrame> {
        let frame = cube.frame();
        let names: Vec<&str> = self
            .features
            .iter()
            .copied()
            .chain(std::iter::once(self.target))
            .collect();

        if let Some(missing) = names.iter().find(|name| frame.column(name).is_err()) {
            return Err(CubeError::MissingColumn((*missing).to_string()));
        }

        let complete = names
            .iter()
            .map(|name| col(*name).is_not_null())
            .reduce(|acc, e| acc.and(e))
            .unwrap_or_else(|| lit(true));

        let projection: Vec<Expr> = std::iter::once(DISTRICT)
            .chain(names.iter().copied())
            .map(col)
            .collect();

        Ok(frame
            .clone()
            .lazy()
            .filter(complete)
            .select(projection)
            .collect()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Cube {
        let frame = df!(
            DISTRICT => ["North", "South", "East"],
            "pw_anaemia_rate" => [Some(0.25), Some(0.3), None],
            "optimum_wg_latest_pct" => [0.6, 0.5, 0.4],
            "pw_hb_measured_pct" => [0.8, 0.7, 0.9],
            "measurement_efficiency_5_6" => [75.0, 80.0, 90.0],
            "visit_coverage_pct" => [77.46, 60.0, 55.0],
            "sam_ratio" => [0.02, 0.01, 0.03],
            "suw_ratio" => [0.02, 0.04, 0.01],
            "lbw_rate_pct" => [0.09, 0.12, 0.1],
            "unrelated" => [1.0, 2.0, 3.0],
        )
        .unwrap();
        Cube::from_frame(frame).unwrap()
    }

    #[test]
    fn test_select_drops_incomplete_rows() {
        let selected = FeatureSet::LBW.select(&cube()).unwrap();
        assert_eq!(selected.height(), 2);
        assert_eq!(selected.width(), 1 + 7 + 1);
        assert!(selected.column("unrelated").is_err());
        assert_eq!(selected.get_column_names()[0].as_str(), DISTRICT);
    }

    #[test]
    fn test_select_missing_column() {
        let err = FeatureSet::STUNTING.select(&cube()).unwrap_err();
        assert!(matches!(err, CubeError::MissingColumn(ref c) if c == "active_awc_pct"));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(FeatureSet::by_name("stunting"), Some(FeatureSet::STUNTING));
        assert!(FeatureSet::by_name("wasting").is_none());
    }
}
