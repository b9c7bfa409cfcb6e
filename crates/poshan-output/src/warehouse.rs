//! The on-disk warehouse for a series of monthly runs.

use crate::error::{Result, WarehouseError};
use poshan_cube::Cube;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const ETL_DIR: &str = "etl";
const CUBES_DIR: &str = "cubes";
const CUBE_PREFIX: &str = "district_cube_";

/// Description of a persisted cube, written next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeManifest {
    /// Month tag (`YYYY-MM`)
    pub month: String,
    /// File name of the cube CSV
    pub file: String,
    /// Number of districts
    pub districts: usize,
    /// Domain keys in join order
    pub domains: Vec<String>,
    /// Cube columns in file order
    pub columns: Vec<String>,
}

impl CubeManifest {
    /// Describe `cube` as persisted under `file`.
    pub fn describe(month: &str, file: &str, cube: &Cube) -> Self {
        Self {
            month: month.to_string(),
            file: file.to_string(),
            districts: cube.district_count(),
            domains: cube.domains().iter().map(ToString::to_string).collect(),
            columns: cube.columns(),
        }
    }
}

/// Paths of the artifacts written for one cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeArtifact {
    /// Cube CSV
    pub table: PathBuf,
    /// Manifest JSON
    pub manifest: PathBuf,
}

/// Warehouse rooted at one directory.
///
/// Construction performs no I/O; call [`init`](Self::init) before writing.
#[derive(Debug, Clone)]
pub struct Warehouse {
    root: PathBuf,
}

impl Warehouse {
    /// Warehouse rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the warehouse directory layout. Idempotent.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(self.root.join(ETL_DIR))?;
        fs::create_dir_all(self.root.join(CUBES_DIR))?;
        info!(root = %self.root.display(), "warehouse initialized");
        Ok(())
    }

    /// Whether [`init`](Self::init) has run for this root.
    pub fn is_initialized(&self) -> bool {
        self.root.join(ETL_DIR).is_dir() && self.root.join(CUBES_DIR).is_dir()
    }

    /// Folder holding every month of cleaned tables.
    pub fn etl_root(&self) -> PathBuf {
        self.root.join(ETL_DIR)
    }

    /// Folder holding the cleaned tables of `month`.
    pub fn etl_dir(&self, month: &str) -> PathBuf {
        self.etl_root().join(month)
    }

    /// Folder holding every cube.
    pub fn cubes_dir(&self) -> PathBuf {
        self.root.join(CUBES_DIR)
    }

    /// Path of the cube CSV for `month`.
    pub fn cube_path(&self, month: &str) -> PathBuf {
        self.cubes_dir().join(format!("{CUBE_PREFIX}{month}.csv"))
    }

    /// Path of the cube manifest for `month`.
    pub fn manifest_path(&self, month: &str) -> PathBuf {
        self.cubes_dir().join(format!("{CUBE_PREFIX}{month}.json"))
    }

    /// Write one cleaned table as `etl/<month>/<name>.csv`.
    pub fn write_cleaned(&self, month: &str, name: &str, table: &DataFrame) -> Result<PathBuf> {
        self.ensure_initialized()?;
        check_component(month)?;
        check_component(name)?;

        let dir = self.etl_dir(month);
        fs::create_dir_all(&dir)?;

        let path = dir.join(format!("{name}.csv"));
        write_csv(&path, table)?;
        debug!(path = %path.display(), rows = table.height(), "wrote cleaned table");
        Ok(path)
    }

    /// Write the cube of `month` and its manifest, replacing earlier output
    /// for the same month.
    pub fn write_cube(&self, month: &str, cube: &Cube) -> Result<CubeArtifact> {
        self.ensure_initialized()?;
        check_component(month)?;

        let table = self.cube_path(month);
        write_csv(&table, cube.frame())?;

        let file_name = table
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let manifest = self.manifest_path(month);
        let description = CubeManifest::describe(month, &file_name, cube);
        fs::write(&manifest, serde_json::to_string_pretty(&description)? + "\n")?;

        info!(
            month,
            districts = cube.district_count(),
            path = %table.display(),
            "cube exported"
        );

        Ok(CubeArtifact { table, manifest })
    }

    /// Month tags that have a cube, ascending.
    pub fn cube_months(&self) -> Result<Vec<String>> {
        let dir = self.cubes_dir();
        if !dir.is_dir() {
            return Err(WarehouseError::NotInitialized(self.root.clone()));
        }

        let mut months: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                name.strip_prefix(CUBE_PREFIX)
                    .and_then(|rest| rest.strip_suffix(".csv"))
                    .map(str::to_string)
            })
            .collect();
        months.sort();
        Ok(months)
    }

    /// Load the cube of `month`, or of the latest month when `None`.
    pub fn read_cube(&self, month: Option<&str>) -> Result<(String, Cube)> {
        let month = match month {
            Some(month) => month.to_string(),
            None => self
                .cube_months()?
                .pop()
                .ok_or_else(|| WarehouseError::MissingCube("latest".to_string()))?,
        };

        let path = self.cube_path(&month);
        if !path.is_file() {
            return Err(WarehouseError::MissingCube(month));
        }

        let cube = Cube::from_frame(poshan_data::load(&path)?)?;
        Ok((month, cube))
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(WarehouseError::NotInitialized(self.root.clone()))
        }
    }
}

fn check_component(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\']);
    if valid {
        Ok(())
    } else {
        Err(WarehouseError::InvalidName(name.to_string()))
    }
}

fn write_csv(path: &Path, table: &DataFrame) -> Result<()> {
    let mut table = table.clone();
    let file = File::create(path)?;
    CsvWriter::new(file).include_header(true).finish(&mut table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-11", true)]
    #[case("anaemia_table", true)]
    #[case("", false)]
    #[case("..", false)]
    #[case("a/b", false)]
    fn test_check_component(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(check_component(name).is_ok(), valid);
    }

    #[test]
    fn test_paths() {
        let warehouse = Warehouse::new("wh");
        assert_eq!(
            warehouse.cube_path("2025-11"),
            PathBuf::from("wh/cubes/district_cube_2025-11.csv")
        );
        assert_eq!(warehouse.etl_dir("2025-11"), PathBuf::from("wh/etl/2025-11"));
    }
}
