//! District key canonicalization.
//!
//! Every domain extract spells districts its own way (`"north  district"`,
//! `"NORTH–DISTRICT"`). The join key is the canonical form:
//! stringify → trim → title-case → en/em dash to `-` → collapse whitespace.
//! Two spellings denote the same district iff their canonical forms are equal.

use crate::error::{DataError, Result};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

/// Name of the district key column in every domain table and in the cube.
pub const DISTRICT: &str = "district";

/// Text a missing district value stringifies to before canonicalization.
const MISSING_TEXT: &str = "nan";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Canonicalize a district name. Total and idempotent.
pub fn canonicalize(raw: &str) -> String {
    let titled = title_case(raw.trim());
    let dashed = titled.replace(['\u{2013}', '\u{2014}'], "-");
    WHITESPACE_RUN.replace_all(&dashed, " ").into_owned()
}

/// Upper-case letters that follow a non-letter, lower-case the rest.
///
/// Case mappings that expand to several characters are skipped so the
/// character count never changes and a second pass is a no-op.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for c in text.chars() {
        let mapped = if previous_is_letter {
            single_char(c.to_lowercase()).unwrap_or(c)
        } else {
            single_char(c.to_uppercase()).unwrap_or(c)
        };
        previous_is_letter = c.is_alphabetic();
        out.push(mapped);
    }

    out
}

fn single_char(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    let first = mapping.next()?;
    mapping.next().is_none().then_some(first)
}

/// Replace column `name` of `df` with its canonical district keys.
///
/// The column may have any dtype; values are stringified first and missing
/// values become `"Nan"`.
pub fn canonicalize_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let column = df
        .column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    let text = column.cast(&DataType::String)?;

    let keys: Vec<String> = text
        .str()?
        .into_iter()
        .map(|value| canonicalize(value.unwrap_or(MISSING_TEXT)))
        .collect();

    df.with_column(Series::new(name.into(), keys))?;
    Ok(())
}
