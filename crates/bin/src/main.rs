//! Poshan CLI binary.
//!
//! Runs the monthly ETL and cube stages and queries built cubes.

mod report;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use poshan::month::month_tag;
use poshan::pipeline::{build_cube_with, run_etl};
use poshan::{Enricher, MonthStamp, NoEnrichment, PipelineConfig};
use poshan_cube::{DistrictLookup, FeatureSet};
use poshan_data::DISTRICT;
use poshan_indicators::Domain;
use polars::prelude::*;
use report::Format;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poshan")]
#[command(about = "Poshan: monthly district nutrition cube", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PathArgs {
    /// JSON configuration file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the raw month folders
    #[arg(long, global = true, env = "POSHAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Root of the warehouse
    #[arg(long, global = true, env = "WAREHOUSE_DIR")]
    warehouse_dir: Option<PathBuf>,

    /// Month to process (YYYY-MM); latest when omitted
    #[arg(long, global = true)]
    month: Option<String>,
}

impl PathArgs {
    fn resolve(self) -> poshan::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(dir) = self.warehouse_dir {
            config.warehouse_dir = dir;
        }
        if self.month.is_some() {
            config.month = self.month;
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw extracts of a month into the warehouse
    Etl {
        /// Stamp every cleaned table with its month
        #[arg(long)]
        stamp_month: bool,
    },

    /// Build the district cube from the cleaned extracts of a month
    Cube,

    /// Profile a single source file
    Inspect {
        /// CSV or Excel file
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Look a district up in a built cube
    Lookup {
        /// District name, any spelling
        district: String,

        /// Restrict output to a feature set (lbw or stunting)
        #[arg(long)]
        features: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.paths.resolve()?;

    match cli.command {
        Commands::Etl { stamp_month } => etl(&config, stamp_month)?,
        Commands::Cube => cube(&config)?,
        Commands::Inspect { path, format } => {
            let table = poshan_data::load(&path)?;
            report::print_profile(
                &path.display().to_string(),
                &poshan_data::profile(&table),
                format,
            );
        }
        Commands::Lookup {
            district,
            features,
            format,
        } => lookup(&config, &district, features.as_deref(), format)?,
    }

    Ok(())
}

fn etl(config: &PipelineConfig, stamp_month: bool) -> Result<(), Box<dyn std::error::Error>> {
    let folder = config.raw_month_folder()?;
    let month = month_tag(&folder);

    let warehouse = config.warehouse();
    warehouse.init()?;

    let enricher: Box<dyn Enricher> = if stamp_month {
        Box::new(MonthStamp::new(month.as_str()))
    } else {
        Box::new(NoEnrichment)
    };

    let summary = run_etl(&folder, &warehouse, &month, enricher.as_ref())?;

    println!("\nETL {} ({} tables)", summary.month, summary.tables.len());
    for table in &summary.tables {
        println!("  {:<48} {:>6} rows  {}", table.name, table.rows, table.path.display());
    }
    if summary.enriched {
        println!("  enrichment: {}", enricher.name());
    }
    Ok(())
}

fn cube(config: &PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    let folder = config.etl_month_folder()?;
    let month = month_tag(&folder);
    info!(month = %month, folder = %folder.display(), "building district cube");

    let pb = ProgressBar::new(Domain::ALL.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Analyzing domains...");

    let cube = match build_cube_with(&folder, |domain, table| {
        pb.set_message(format!("{} ({} rows)", domain, table.height()));
        pb.inc(1);
    }) {
        Ok(cube) => {
            pb.finish_with_message(format!("Assembled {} districts", cube.district_count()));
            cube
        }
        Err(e) => {
            pb.finish_with_message("Failed!");
            return Err(e.into());
        }
    };

    let artifact = config.warehouse().write_cube(&month, &cube)?;
    println!("\nCube {}", month);
    println!("  districts: {}", cube.district_count());
    println!("  columns:   {}", cube.columns().len());
    println!("  table:     {}", artifact.table.display());
    println!("  manifest:  {}", artifact.manifest.display());
    Ok(())
}

fn lookup(
    config: &PipelineConfig,
    district: &str,
    features: Option<&str>,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let (month, cube) = config.warehouse().read_cube(config.month.as_deref())?;
    let lookup = DistrictLookup::new(&cube)?;

    let Some(hit) = lookup.resolve(district) else {
        return Err(format!("no district matching '{}' in cube {}", district, month).into());
    };

    let row = match features {
        None => cube.frame().slice(hit.row as i64, 1),
        Some(name) => {
            let set = FeatureSet::by_name(name).ok_or_else(|| {
                let known: Vec<&str> = FeatureSet::ALL.iter().map(|s| s.name).collect();
                format!("unknown feature set '{}' (known: {})", name, known.join(", "))
            })?;
            set.select(&cube)?
                .lazy()
                .filter(col(DISTRICT).eq(lit(hit.district.clone())))
                .collect()?
        }
    };

    report::print_lookup(&month, &hit, &row, format)?;
    Ok(())
}
