//! Supplementary nutrition indicators.

mod snp;

pub use snp::SnpAnalyzer;
