//! Integration tests for warehouse writing.

use poshan_cube::{Cube, DistrictLookup, MatchStage};
use poshan_output::{CubeManifest, Warehouse, WarehouseError};
use polars::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cube() -> Cube {
    let frame = df!(
        "district" => ["North-District", "South"],
        "stunting_total_pct_5_6" => [12.5, 7.25],
        "lbw_rate_pct" => [Some(0.09), None],
    )
    .unwrap();
    Cube::from_frame(frame).unwrap()
}

#[test]
fn test_write_requires_init() {
    let dir = TempDir::new().unwrap();
    let warehouse = Warehouse::new(dir.path().join("warehouse"));

    let err = warehouse.write_cube("2025-11", &cube()).unwrap_err();
    assert!(matches!(err, WarehouseError::NotInitialized(_)));
    assert!(!dir.path().join("warehouse").exists());
}

#[test]
fn test_cube_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let warehouse = Warehouse::new(dir.path());
    warehouse.init().unwrap();

    let first = warehouse.write_cube("2025-11", &cube()).unwrap();
    let table = fs::read(&first.table).unwrap();
    let manifest = fs::read(&first.manifest).unwrap();

    let second = warehouse.write_cube("2025-11", &cube()).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second.table).unwrap(), table);
    assert_eq!(fs::read(&second.manifest).unwrap(), manifest);

    let text = String::from_utf8(table).unwrap();
    assert!(text.starts_with("district,stunting_total_pct_5_6,lbw_rate_pct\n"));

    let parsed: CubeManifest = serde_json::from_slice(&manifest).unwrap();
    assert_eq!(parsed.month, "2025-11");
    assert_eq!(parsed.file, "district_cube_2025-11.csv");
    assert_eq!(parsed.districts, 2);
    assert_eq!(parsed.domains.first().map(String::as_str), Some("gm_5_6"));
}

#[test]
fn test_read_latest_cube() {
    let dir = TempDir::new().unwrap();
    let warehouse = Warehouse::new(dir.path());
    warehouse.init().unwrap();

    warehouse.write_cube("2025-10", &cube()).unwrap();
    warehouse.write_cube("2025-11", &cube()).unwrap();
    assert_eq!(warehouse.cube_months().unwrap(), vec!["2025-10", "2025-11"]);

    let (month, read) = warehouse.read_cube(None).unwrap();
    assert_eq!(month, "2025-11");
    assert_eq!(read.district_count(), 2);
    assert_eq!(read.districts().unwrap(), vec!["North-District", "South"]);

    let err = warehouse.read_cube(Some("2024-01")).unwrap_err();
    assert!(matches!(err, WarehouseError::MissingCube(m) if m == "2024-01"));
}

#[test]
fn test_write_cleaned_table() {
    let dir = TempDir::new().unwrap();
    let warehouse = Warehouse::new(dir.path());
    warehouse.init().unwrap();

    let table = df!("district" => ["North"], "total_awc" => [10.0]).unwrap();
    let path = warehouse.write_cleaned("2025-11", "awc_summary", &table).unwrap();
    assert_eq!(path, dir.path().join("etl/2025-11/awc_summary.csv"));
    assert!(fs::read_to_string(path).unwrap().starts_with("district,total_awc\n"));

    let err = warehouse.write_cleaned("2025-11", "../escape", &table).unwrap_err();
    assert!(matches!(err, WarehouseError::InvalidName(_)));
}

#[test]
fn test_nan_district_key_survives_round_trip() {
    let dir = TempDir::new().unwrap();
    let warehouse = Warehouse::new(dir.path());
    warehouse.init().unwrap();

    let frame = df!(
        "district" => ["Nan", "North"],
        "lbw_rate_pct" => [0.1, 0.2],
    )
    .unwrap();
    warehouse
        .write_cube("2025-11", &Cube::from_frame(frame).unwrap())
        .unwrap();

    let (_, cube) = warehouse.read_cube(None).unwrap();
    assert_eq!(cube.districts().unwrap(), vec!["Nan", "North"]);

    let hit = DistrictLookup::new(&cube).unwrap().resolve("nan").unwrap();
    assert_eq!(hit.district, "Nan");
    assert_eq!(hit.stage, MatchStage::Exact);
}
