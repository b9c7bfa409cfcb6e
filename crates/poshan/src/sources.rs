//! Source file discovery inside one month folder.

use crate::error::Result;
use poshan_data::SourceFormat;
use poshan_indicators::{Domain, DomainError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The source file found for each domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    files: BTreeMap<Domain, PathBuf>,
}

impl SourceSet {
    /// Match every supported file in `folder` to a domain by name prefix.
    ///
    /// Names are compared lower-cased. When several files match one domain,
    /// the lexicographically last name wins.
    pub fn discover(folder: &Path) -> Result<Self> {
        let mut names: Vec<(String, PathBuf)> = fs::read_dir(folder)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && SourceFormat::from_path(path).is_ok())
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?.to_lowercase();
                Some((name, path))
            })
            .collect();
        names.sort();

        let mut files = BTreeMap::new();
        for (name, path) in names {
            if let Some(domain) = Domain::ALL
                .into_iter()
                .find(|domain| name.starts_with(domain.file_prefix()))
            {
                debug!(domain = %domain, file = %path.display(), "matched source");
                files.insert(domain, path);
            }
        }

        Ok(Self { files })
    }

    /// Source file of `domain`, if one was found.
    pub fn get(&self, domain: Domain) -> Option<&Path> {
        self.files.get(&domain).map(PathBuf::as_path)
    }

    /// Source file of `domain`, or [`DomainError::EmptySource`].
    pub fn require(&self, domain: Domain) -> std::result::Result<&Path, DomainError> {
        self.get(domain).ok_or_else(|| DomainError::EmptySource {
            domain,
            detail: format!("no file starting with '{}'", domain.file_prefix()),
        })
    }

    /// Domains with no source file, in join order.
    pub fn missing(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|domain| !self.files.contains_key(domain))
            .collect()
    }

    /// Number of domains found.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no domain was found.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
