//! Adolescent girls indicators.

mod girls;

pub use girls::AdolescentGirlsAnalyzer;
