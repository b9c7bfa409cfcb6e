#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/poshan-intelligence/poshan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod district;
pub mod error;
pub mod headers;
pub mod loader;

pub use district::{DISTRICT, canonicalize, canonicalize_column};
pub use error::{DataError, Result};
pub use headers::{HeaderRules, normalize_headers, normalize_label};
pub use loader::{ColumnProfile, SourceFormat, TableProfile, load, load_all, profile};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
