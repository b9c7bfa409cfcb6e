//! Maternal and infant health indicators.

mod anaemia;
mod low_birth_weight;
mod weight_gain;

pub use anaemia::AnaemiaAnalyzer;
pub use low_birth_weight::LowBirthWeightAnalyzer;
pub use weight_gain::WeightGainAnalyzer;
