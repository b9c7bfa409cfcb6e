#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/poshan-intelligence/poshan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod warehouse;

pub use error::{Result, WarehouseError};
pub use warehouse::{CubeArtifact, CubeManifest, Warehouse};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
