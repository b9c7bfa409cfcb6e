//! Growth monitoring indicators for children 0 to 6 years.

mod monitoring;

pub use monitoring::{AgeBand, GrowthMonitoringAnalyzer};
