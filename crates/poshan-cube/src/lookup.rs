//! District lookup over a cube.
//!
//! Resolution is a fixed two-stage policy: exact match of the canonical
//! query against the canonical keys, then the first key (in row order) that
//! contains the canonical query. The second stage is ambiguous for district
//! names that are substrings of others; the first hit wins.

use crate::assemble::Cube;
use crate::error::Result;
use poshan_data::canonicalize;
use polars::prelude::*;
use serde::Serialize;

/// Stage of the lookup policy that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStage {
    /// Canonical key equals the canonical query
    Exact,
    /// Canonical key contains the canonical query
    Contains,
}

/// A resolved district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupMatch {
    /// Canonical key of the matched row
    pub district: String,
    /// Row index in the cube
    pub row: usize,
    /// Stage that matched
    pub stage: MatchStage,
}

/// Two-stage district resolver bound to one cube.
#[derive(Debug)]
pub struct DistrictLookup<'a> {
    cube: &'a Cube,
    keys: Vec<String>,
}

impl<'a> DistrictLookup<'a> {
    /// Index the district keys of `cube`.
    pub fn new(cube: &'a Cube) -> Result<Self> {
        Ok(Self {
            cube,
            keys: cube.districts()?,
        })
    }

    /// Resolve `query` to a cube row.
    pub fn resolve(&self, query: &str) -> Option<LookupMatch> {
        let query = canonicalize(query);
        if query.is_empty() {
            return None;
        }

        let hit = |stage: MatchStage, row: usize| LookupMatch {
            district: self.keys[row].clone(),
            row,
            stage,
        };

        if let Some(row) = self.keys.iter().position(|key| *key == query) {
            return Some(hit(MatchStage::Exact, row));
        }

        self.keys
            .iter()
            .position(|key| key.contains(&query))
            .map(|row| hit(MatchStage::Contains, row))
    }

    /// The single cube row for `query`, if any.
    pub fn find(&self, query: &str) -> Option<DataFrame> {
        self.resolve(query)
            .map(|m| self.cube.frame().slice(m.row as i64, 1))
    }
}
