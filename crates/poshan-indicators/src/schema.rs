//! Explicit per-domain schemas.
//!
//! A schema maps normalized source headers to internal field names. It is
//! resolved against the normalized table before any indicator is computed, so
//! a reworded upstream header surfaces immediately as
//! [`DomainError::MissingField`] naming the internal field.

use crate::domain::Domain;
use crate::error::{DomainError, Result};
use poshan_data::DISTRICT;
use polars::prelude::*;
use std::collections::BTreeSet;
use std::fmt;

/// How a field is found among the normalized headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMatch {
    /// First header equal to one of the aliases
    Exact(&'static [&'static str]),
    /// First header starting with the prefix, for headers that embed the
    /// reporting period
    Prefix(&'static str),
}

impl SourceMatch {
    fn find<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        match self {
            Self::Exact(aliases) => aliases
                .iter()
                .find_map(|alias| headers.iter().find(|h| h.as_str() == *alias))
                .map(String::as_str),
            Self::Prefix(prefix) => headers
                .iter()
                .find(|h| h.starts_with(prefix))
                .map(String::as_str),
        }
    }
}

/// One numeric field of a domain schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Internal field name
    pub field: &'static str,
    /// Where the field comes from
    pub source: SourceMatch,
    /// Whether the domain's formulas depend on it
    pub required: bool,
}

impl FieldSpec {
    /// Required field matched by exact alias.
    pub const fn exact(field: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            field,
            source: SourceMatch::Exact(aliases),
            required: true,
        }
    }

    /// Required field matched by header prefix.
    pub const fn prefix(field: &'static str, prefix: &'static str) -> Self {
        Self {
            field,
            source: SourceMatch::Prefix(prefix),
            required: true,
        }
    }

    /// Carry the field through when present, without failing when absent.
    pub const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }
}

/// Internal fields that were found in a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: BTreeSet<&'static str>,
}

impl FieldSet {
    /// Whether `field` was resolved.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A normalized table projected onto its schema.
pub struct Resolved {
    /// `district` plus every resolved field, numeric fields cast to `Float64`
    pub data: LazyFrame,
    /// Which schema fields were found
    pub fields: FieldSet,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Resolve `schema` against the normalized headers of `df`.
///
/// The result keeps only `district` and the schema fields, renamed to their
/// internal names. Non-numeric and non-finite cells become null. Fails on the
/// first required field that cannot be matched.
pub fn resolve(domain: Domain, schema: &[FieldSpec], df: &DataFrame) -> Result<Resolved> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|h| h.to_string())
        .collect();

    if !headers.iter().any(|h| h == DISTRICT) {
        return Err(DomainError::missing_field(domain, DISTRICT));
    }

    let mut projection = vec![col(DISTRICT)];
    let mut fields = FieldSet::default();

    for spec in schema {
        match spec.source.find(&headers) {
            Some(header) => {
                let value = col(header).cast(DataType::Float64);
                projection.push(
                    when(value.clone().is_finite())
                        .then(value)
                        .otherwise(lit(NULL))
                        .alias(spec.field),
                );
                fields.fields.insert(spec.field);
            }
            None if spec.required => return Err(DomainError::missing_field(domain, spec.field)),
            None => {}
        }
    }

    Ok(Resolved {
        data: df.clone().lazy().select(projection),
        fields,
    })
}
