#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/poshan-intelligence/poshan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod assemble;
pub mod error;
pub mod features;
pub mod lookup;

// Re-export main types
pub use assemble::{ANCHOR, Cube, assemble};
pub use error::{CubeError, Result};
pub use features::FeatureSet;
pub use lookup::{DistrictLookup, LookupMatch, MatchStage};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
