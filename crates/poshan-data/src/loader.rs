//! Tabular source loading.
//!
//! Dispatch is purely on the file extension: `.csv` goes through the `csv`
//! crate, spreadsheet extensions through `calamine` (first worksheet). Cells
//! are gathered into a row grid first, then each column becomes `Float64`
//! when every non-empty cell is numeric and `String` otherwise.

use crate::error::{DataError, Result};
use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Source formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Comma-separated text.
    Delimited,
    /// Excel or OpenDocument workbook.
    Spreadsheet,
}

impl SourceFormat {
    /// Determine the format from the extension of `path` alone.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Delimited),
            "xlsx" | "xls" | "xlsm" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(DataError::UnsupportedFormat(extension)),
        }
    }
}

/// A single parsed cell.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Number(f64),
    Text(String),
    /// `nan`, `inf` and the like: missing in a numeric column, kept verbatim
    /// in a text column
    NonFinite(String),
    Empty,
}

impl Cell {
    fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() {
                Self::Number(value)
            } else {
                Self::NonFinite(raw.to_string())
            }
        } else {
            Self::Text(raw.to_string())
        }
    }

    fn from_spreadsheet(data: &Data) -> Self {
        match data {
            Data::Int(v) => Self::Number(*v as f64),
            Data::Float(v) if v.is_finite() => Self::Number(*v),
            Data::Float(_) => Self::Empty,
            Data::String(s) if s.trim().is_empty() => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Empty | Data::Error(_) => Self::Empty,
            other => Self::Text(other.to_string()),
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Self::Number(v) => Some(v.to_string()),
            Self::Text(s) | Self::NonFinite(s) => Some(s.clone()),
            Self::Empty => None,
        }
    }
}

/// Header row plus data rows, before typing.
#[derive(Debug, Default)]
struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    fn into_frame(self) -> Result<DataFrame> {
        let headers = disambiguate_headers(&self.headers);
        let mut columns: Vec<Column> = Vec::with_capacity(headers.len());

        for (idx, name) in headers.into_iter().enumerate() {
            let cells: Vec<Option<&Cell>> = self.rows.iter().map(|row| row.get(idx)).collect();

            let numeric = cells
                .iter()
                .all(|c| !matches!(c, Some(Cell::Text(_))));

            let series = if numeric {
                let values: Vec<Option<f64>> = cells
                    .iter()
                    .map(|c| match c {
                        Some(Cell::Number(v)) => Some(*v),
                        _ => None,
                    })
                    .collect();
                Series::new(name.into(), values)
            } else {
                let values: Vec<Option<String>> = cells
                    .iter()
                    .map(|c| c.and_then(Cell::as_text))
                    .collect();
                Series::new(name.into(), values)
            };
            columns.push(series.into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

/// Give repeated headers a `.N` suffix in load order and name blank ones
/// `Unnamed: <idx>`.
fn disambiguate_headers(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    headers
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                raw.clone()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn read_delimited(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Grid { headers, rows })
}

fn read_spreadsheet(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::empty_source(path, "workbook has no worksheets"))??;

    let mut rows_iter = range.rows();
    let headers = rows_iter
        .next()
        .map(|row| {
            row.iter()
                .map(|c| Cell::from_spreadsheet(c).as_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    let rows = rows_iter
        .map(|row| row.iter().map(Cell::from_spreadsheet).collect())
        .collect();

    Ok(Grid { headers, rows })
}

/// Load one source file into a table.
///
/// Fails with [`DataError::UnsupportedFormat`] for unknown extensions and
/// [`DataError::EmptySource`] when the file does not exist or has no data rows.
pub fn load(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;

    if !path.is_file() {
        return Err(DataError::empty_source(path, "file not found"));
    }

    let grid = match format {
        SourceFormat::Delimited => read_delimited(path)?,
        SourceFormat::Spreadsheet => read_spreadsheet(path)?,
    };

    if grid.rows.is_empty() {
        return Err(DataError::empty_source(path, "no data rows"));
    }

    let df = grid.into_frame()?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "loaded source");
    Ok(df)
}

/// Load every supported file in `folder`, keyed by file stem.
///
/// Files with other extensions are ignored. The map is ordered by stem so
/// downstream writes happen in a stable order.
pub fn load_all(folder: impl AsRef<Path>) -> Result<BTreeMap<String, DataFrame>> {
    let folder = folder.as_ref();
    let mut tables = BTreeMap::new();

    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() || SourceFormat::from_path(&path).is_err() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        info!(file = %path.display(), "loading");
        tables.insert(stem.to_string(), load(&path)?);
    }

    info!(count = tables.len(), folder = %folder.display(), "loaded source files");
    Ok(tables)
}

/// Shape and null counts of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column label
    pub name: String,
    /// Polars dtype, rendered
    pub dtype: String,
    /// Number of missing values
    pub nulls: usize,
}

/// Quick structural summary of a loaded table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of rows
    pub rows: usize,
    /// Per-column details, in table order
    pub columns: Vec<ColumnProfile>,
}

/// Summarize `df` for inspection output.
pub fn profile(df: &DataFrame) -> TableProfile {
    TableProfile {
        rows: df.height(),
        columns: df
            .get_columns()
            .iter()
            .map(|c| ColumnProfile {
                name: c.name().to_string(),
                dtype: c.dtype().to_string(),
                nulls: c.null_count(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.csv", SourceFormat::Delimited)]
    #[case("A.CSV", SourceFormat::Delimited)]
    #[case("b.xlsx", SourceFormat::Spreadsheet)]
    #[case("b.xls", SourceFormat::Spreadsheet)]
    #[case("c.ods", SourceFormat::Spreadsheet)]
    fn test_format_dispatch(#[case] name: &str, #[case] expected: SourceFormat) {
        assert_eq!(SourceFormat::from_path(Path::new(name)).unwrap(), expected);
    }

    #[rstest]
    #[case("notes.txt", "txt")]
    #[case("data.parquet", "parquet")]
    #[case("no_extension", "")]
    fn test_unsupported_format(#[case] name: &str, #[case] ext: &str) {
        let err = SourceFormat::from_path(Path::new(name)).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(e) if e == ext));
    }

    #[test]
    fn test_disambiguate_headers() {
        let headers: Vec<String> = ["District", "Anaemic", "Anaemic", "", "Anaemic"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            disambiguate_headers(&headers),
            vec!["District", "Anaemic", "Anaemic.1", "Unnamed: 3", "Anaemic.2"]
        );
    }

    #[test]
    fn test_grid_typing() {
        let grid = Grid {
            headers: vec!["district".into(), "count".into(), "mixed".into()],
            rows: vec![
                vec![Cell::from_text("North"), Cell::from_text("10"), Cell::from_text("7")],
                vec![Cell::from_text("South"), Cell::from_text(" "), Cell::from_text("n/a")],
                vec![Cell::from_text("East")],
            ],
        };

        let df = grid.into_frame().unwrap();
        assert_eq!(df.shape(), (3, 3));
        assert_eq!(df.column("count").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("count").unwrap().null_count(), 2);
        assert_eq!(df.column("mixed").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("mixed").unwrap().str().unwrap().get(0), Some("7"));
    }

    #[rstest]
    #[case("nan")]
    #[case("NaN")]
    #[case("inf")]
    #[case("-Infinity")]
    fn test_non_finite_text_is_not_a_number(#[case] raw: &str) {
        assert_eq!(Cell::from_text(raw), Cell::NonFinite(raw.to_string()));
    }

    #[test]
    fn test_non_finite_cells_in_numeric_and_text_columns() {
        let grid = Grid {
            headers: vec!["district".into(), "sam".into()],
            rows: vec![
                vec![Cell::from_text("Nan"), Cell::from_text("nan")],
                vec![Cell::from_text("North"), Cell::from_text("4")],
                vec![Cell::from_text("South"), Cell::from_text("inf")],
            ],
        };

        let df = grid.into_frame().unwrap();
        let sam = df.column("sam").unwrap().f64().unwrap();
        assert_eq!(sam.into_iter().collect::<Vec<_>>(), vec![None, Some(4.0), None]);
        let district = df.column("district").unwrap().str().unwrap();
        assert_eq!(district.get(0), Some("Nan"));
    }

    #[test]
    fn test_spreadsheet_cell_typing() {
        assert_eq!(Cell::from_spreadsheet(&Data::Int(12)), Cell::Number(12.0));
        assert_eq!(Cell::from_spreadsheet(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(Cell::from_spreadsheet(&Data::Float(f64::NAN)), Cell::Empty);
        assert_eq!(Cell::from_spreadsheet(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(
            Cell::from_spreadsheet(&Data::Error(calamine::CellErrorType::Div0)),
            Cell::Empty
        );
        assert_eq!(
            Cell::from_spreadsheet(&Data::DateTimeIso("2025-11-01".into())),
            Cell::Text("2025-11-01".into())
        );
    }

    #[test]
    fn test_profile() {
        let df = df!(
            "district" => ["a", "b"],
            "value" => [Some(1.0), None],
        )
        .unwrap();

        let p = profile(&df);
        assert_eq!(p.rows, 2);
        assert_eq!(p.columns[1].name, "value");
        assert_eq!(p.columns[1].nulls, 1);
    }
}
