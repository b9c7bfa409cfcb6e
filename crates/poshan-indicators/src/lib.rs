#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/poshan-intelligence/poshan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod adolescent;
pub mod analyzer;
pub mod domain;
pub mod error;
pub mod growth;
pub mod maternal;
pub mod numeric;
pub mod nutrition;
pub mod registry;
pub mod schema;
pub mod service;

pub use analyzer::DomainAnalyzer;
pub use domain::Domain;
pub use error::{DomainError, Result};
pub use numeric::{Precision, round_to, safe_ratio};
pub use schema::{FieldSet, FieldSpec, SourceMatch};

// Re-export registry types for convenience
pub use registry::{
    DomainCategory, DomainInfo, analyzer_for, available_domains, count_by_category,
    domains_by_category, get_domain_info,
};

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
