//! Month folder selection.
//!
//! Monthly inputs and outputs live in folders named `YYYY-MM`. The latest is
//! the lexicographically greatest name, which is also the chronologically
//! latest because the format is fixed-width and zero-padded.

use crate::error::{PipelineError, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

static MONTH_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("valid regex"));

/// Whether `name` has the `YYYY-MM` shape.
pub fn is_month_tag(name: &str) -> bool {
    MONTH_TAG.is_match(name)
}

/// Validate a user-supplied month tag and return its first day.
pub fn parse_month(tag: &str) -> Result<NaiveDate> {
    if !is_month_tag(tag) {
        return Err(PipelineError::InvalidMonth(tag.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{tag}-01"), "%Y-%m-%d")
        .map_err(|_| PipelineError::InvalidMonth(tag.to_string()))
}

/// Every `YYYY-MM` directory directly under `base`, ascending.
pub fn month_folders(base: &Path) -> Result<Vec<PathBuf>> {
    if !base.is_dir() {
        return Err(PipelineError::MissingBase(base.to_path_buf()));
    }

    let mut folders: Vec<PathBuf> = fs::read_dir(base)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(is_month_tag)
        })
        .collect();
    folders.sort();
    Ok(folders)
}

/// The latest month folder under `base`.
pub fn latest_month_folder(base: &Path) -> Result<PathBuf> {
    month_folders(base)?
        .pop()
        .ok_or_else(|| PipelineError::NoMonthFolders(base.to_path_buf()))
}

/// Month tag of a month folder.
pub fn month_tag(folder: &Path) -> String {
    folder
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
