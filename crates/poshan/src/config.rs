//! Pipeline configuration.

use crate::error::{PipelineError, Result};
use crate::month::{latest_month_folder, parse_month};
use poshan_output::Warehouse;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root of the raw month folders
    pub data_dir: PathBuf,
    /// Root of the warehouse
    pub warehouse_dir: PathBuf,
    /// Month to process; the latest available when unset
    pub month: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            warehouse_dir: PathBuf::from("warehouse"),
            month: None,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| PipelineError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Warehouse at [`warehouse_dir`](Self::warehouse_dir).
    pub fn warehouse(&self) -> Warehouse {
        Warehouse::new(&self.warehouse_dir)
    }

    /// Raw month folder to process.
    pub fn raw_month_folder(&self) -> Result<PathBuf> {
        self.month_folder(&self.data_dir)
    }

    /// Cleaned ETL month folder to build the cube from.
    pub fn etl_month_folder(&self) -> Result<PathBuf> {
        self.month_folder(&self.warehouse().etl_root())
    }

    fn month_folder(&self, base: &Path) -> Result<PathBuf> {
        match &self.month {
            Some(month) => {
                parse_month(month)?;
                let folder = base.join(month);
                if folder.is_dir() {
                    Ok(folder)
                } else {
                    Err(PipelineError::MissingBase(folder))
                }
            }
            None => latest_month_folder(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.warehouse_dir, PathBuf::from("warehouse"));
        assert!(config.month.is_none());
    }

    #[test]
    fn test_from_json_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poshan.json");
        fs::write(&path, r#"{"data_dir": "/srv/raw", "month": "2025-11"}"#).unwrap();

        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/raw"));
        assert_eq!(config.warehouse_dir, PathBuf::from("warehouse"));
        assert_eq!(config.month.as_deref(), Some("2025-11"));
    }

    #[test]
    fn test_from_json_file_rejects_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poshan.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_json_file(&path),
            Err(PipelineError::Config { .. })
        ));
    }

    #[test]
    fn test_month_override() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("2025-10")).unwrap();
        fs::create_dir(dir.path().join("2025-11")).unwrap();

        let mut config = PipelineConfig {
            data_dir: dir.path().to_path_buf(),
            ..PipelineConfig::default()
        };
        assert!(config.raw_month_folder().unwrap().ends_with("2025-11"));

        config.month = Some("2025-10".to_string());
        assert!(config.raw_month_folder().unwrap().ends_with("2025-10"));

        config.month = Some("2025-12".to_string());
        assert!(matches!(config.raw_month_folder(), Err(PipelineError::MissingBase(_))));

        config.month = Some("October".to_string());
        assert!(matches!(config.raw_month_folder(), Err(PipelineError::InvalidMonth(_))));
    }
}
