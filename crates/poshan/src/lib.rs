#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/poshan-intelligence/poshan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod enrich;
pub mod error;
pub mod month;
pub mod pipeline;
pub mod sources;

// Re-export main types from sub-crates
pub use poshan_cube as cube;
pub use poshan_data as data;
pub use poshan_indicators as indicators;
pub use poshan_output as output;

pub use config::PipelineConfig;
pub use enrich::{Enricher, MonthStamp, NoEnrichment, Tables};
pub use error::{PipelineError, Result};
pub use month::{latest_month_folder, parse_month};
pub use pipeline::{EtlSummary, build_cube, run_cube, run_etl};
pub use sources::SourceSet;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
