//! Service delivery indicators: home visits, measurement and centre status.

mod awc_summary;
mod home_visit;
mod measuring_efficiency;

pub use awc_summary::{ACTIVE_WEIGHT, AwcSummaryAnalyzer, INACTIVE_WEIGHT};
pub use home_visit::HomeVisitAnalyzer;
pub use measuring_efficiency::MeasuringEfficiencyAnalyzer;
