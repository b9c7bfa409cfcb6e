//! The two stages of a monthly run.
//!
//! - ETL: raw month folder → basic cleaning → optional enrichment → cleaned
//!   tables in the warehouse.
//! - Cube: month folder → ten domain analyses → assembled cube → warehouse.
//!
//! Both stages write through a [`Warehouse`] the caller has initialized.

use crate::config::PipelineConfig;
use crate::enrich::{Enricher, Tables};
use crate::error::Result;
use crate::month::month_tag;
use crate::sources::SourceSet;
use poshan_cube::{Cube, assemble};
use poshan_data::{HeaderRules, load_all, normalize_headers};
use poshan_indicators::{Domain, analyzer_for};
use poshan_output::{CubeArtifact, Warehouse};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One table written by the ETL stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedTable {
    /// File stem of the source
    pub name: String,
    /// Rows after cleaning
    pub rows: usize,
    /// Written file
    pub path: PathBuf,
}

/// Outcome of the ETL stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlSummary {
    /// Month tag
    pub month: String,
    /// Tables written, by name
    pub tables: Vec<CleanedTable>,
    /// Whether the enrichment step was applied
    pub enriched: bool,
}

/// Basic cleaning of a raw table.
///
/// Normalizes headers with the default rules, trims surrounding whitespace
/// of text cells and drops exact duplicate rows, keeping the first.
pub fn clean_table(raw: DataFrame) -> Result<DataFrame> {
    let mut df = normalize_headers(raw, HeaderRules::BASE)?;

    let text_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().to_string())
        .collect();

    for name in text_columns {
        let trimmed: StringChunked = df
            .column(&name)?
            .str()?
            .into_iter()
            .map(|value| value.map(str::trim))
            .collect();
        df.with_column(trimmed.with_name(name.as_str().into()).into_series())?;
    }

    Ok(df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?)
}

/// Run the ETL stage for the files in `raw_folder`.
///
/// The enricher is checked once. An enrichment failure is logged and the
/// cleaned tables are written as they are.
pub fn run_etl(
    raw_folder: &Path,
    warehouse: &Warehouse,
    month: &str,
    enricher: &dyn Enricher,
) -> Result<EtlSummary> {
    info!(folder = %raw_folder.display(), month, "starting ETL");

    let mut cleaned = Tables::new();
    for (name, raw) in load_all(raw_folder)? {
        let table = clean_table(raw)?;
        info!(table = %name, rows = table.height(), "cleaned");
        cleaned.insert(name, table);
    }

    let mut enriched = false;
    if enricher.is_available() {
        match enricher.enrich(&cleaned) {
            Ok(tables) => {
                info!(enricher = enricher.name(), "applied enrichment");
                cleaned = tables;
                enriched = true;
            }
            Err(e) => warn!(enricher = enricher.name(), error = %e, "enrichment failed, skipping"),
        }
    } else {
        info!(enricher = enricher.name(), "no enrichment available, skipping");
    }

    let mut tables = Vec::with_capacity(cleaned.len());
    for (name, table) in &cleaned {
        let path = warehouse.write_cleaned(month, name, table)?;
        tables.push(CleanedTable {
            name: name.clone(),
            rows: table.height(),
            path,
        });
    }

    info!(month, tables = tables.len(), "completed ETL");
    Ok(EtlSummary {
        month: month.to_string(),
        tables,
        enriched,
    })
}

/// ETL stage for the month selected by `config`.
pub fn run_monthly_etl(config: &PipelineConfig, enricher: &dyn Enricher) -> Result<EtlSummary> {
    let folder = config.raw_month_folder()?;
    let month = month_tag(&folder);
    run_etl(&folder, &config.warehouse(), &month, enricher)
}

/// Analyze every domain source in `folder` and assemble the cube.
pub fn build_cube(folder: &Path) -> Result<Cube> {
    build_cube_with(folder, |_, _| {})
}

/// [`build_cube`], calling `on_domain` after each domain is analyzed.
///
/// Aborts on the first domain that fails; no partial cube is produced.
pub fn build_cube_with<F>(folder: &Path, mut on_domain: F) -> Result<Cube>
where
    F: FnMut(Domain, &DataFrame),
{
    let sources = SourceSet::discover(folder)?;

    let mut tables = BTreeMap::new();
    for domain in Domain::ALL {
        let path = sources.require(domain)?;
        let table = analyzer_for(domain).analyze(path)?;
        on_domain(domain, &table);
        tables.insert(domain, table);
    }

    Ok(assemble(tables)?)
}

/// Cube stage for the month selected by `config`, read from the cleaned ETL
/// tables and written to the warehouse.
pub fn run_cube(config: &PipelineConfig) -> Result<(String, CubeArtifact)> {
    let folder = config.etl_month_folder()?;
    let month = month_tag(&folder);

    info!(month = %month, folder = %folder.display(), "building district cube");
    let cube = build_cube(&folder)?;
    let artifact = config.warehouse().write_cube(&month, &cube)?;

    Ok((month, artifact))
}
