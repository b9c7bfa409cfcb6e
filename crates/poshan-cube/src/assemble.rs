//! Cube assembly.
//!
//! The anchor domain's rows define the universe of districts. Every other
//! domain is left-joined onto the running cube in [`Domain::ALL`] order, so
//! an anchor row always survives and a key found only outside the anchor
//! contributes nothing.

use crate::error::{CubeError, Result};
use poshan_data::DISTRICT;
use poshan_indicators::Domain;
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Domain whose rows define the districts of the cube.
pub const ANCHOR: Domain = Domain::GrowthFiveToSix;

const ROW_ORDER: &str = "__anchor_row";

/// One month's district intelligence cube.
///
/// Immutable once assembled: one row per anchor district, `district` first,
/// followed by every domain's fields in join order.
#[derive(Debug, Clone)]
pub struct Cube {
    frame: DataFrame,
    domains: Vec<Domain>,
}

impl Cube {
    /// Wrap a previously persisted cube table.
    pub fn from_frame(frame: DataFrame) -> Result<Self> {
        if frame.column(DISTRICT).is_err() {
            return Err(CubeError::MissingKey(ANCHOR));
        }
        Ok(Self {
            frame,
            domains: Domain::ALL.to_vec(),
        })
    }

    /// The cube table.
    pub const fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of districts (rows).
    pub fn district_count(&self) -> usize {
        self.frame.height()
    }

    /// Column names, `district` first.
    pub fn columns(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Domains in the order they were joined, anchor first.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// District keys in row order.
    pub fn districts(&self) -> Result<Vec<String>> {
        let keys = self.frame.column(DISTRICT)?.str()?;
        Ok(keys
            .into_iter()
            .map(|key| key.unwrap_or_default().to_string())
            .collect())
    }

    /// Consume the cube and return its table.
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

/// Left-join every domain table onto the anchor table.
///
/// Tables are expected to carry canonical district keys, as produced by the
/// domain analyzers. Fails when a domain is missing, a table has no
/// `district` column, or a field would overwrite one from an earlier domain.
pub fn assemble(mut tables: BTreeMap<Domain, DataFrame>) -> Result<Cube> {
    let anchor = take_table(&mut tables, ANCHOR)?;

    let mut seen: HashSet<String> = anchor
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut cube = anchor.lazy().with_row_index(ROW_ORDER, None);

    for domain in Domain::ALL.into_iter().filter(|d| *d != ANCHOR) {
        let table = take_table(&mut tables, domain)?;

        for name in table.get_column_names() {
            if name.as_str() != DISTRICT && !seen.insert(name.to_string()) {
                return Err(CubeError::ColumnCollision {
                    domain,
                    column: name.to_string(),
                });
            }
        }

        let distinct = table.column(DISTRICT)?.as_materialized_series().n_unique()?;
        if distinct < table.height() {
            warn!(
                domain = %domain,
                rows = table.height(),
                distinct,
                "repeated district keys; matching anchor rows will repeat"
            );
        }

        debug!(domain = %domain, columns = table.width(), "joining domain");
        cube = cube.join(
            table.lazy(),
            [col(DISTRICT)],
            [col(DISTRICT)],
            JoinArgs::new(JoinType::Left),
        );
    }

    let frame = cube
        .sort(
            [ROW_ORDER],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?
        .drop(ROW_ORDER)?;

    info!(
        districts = frame.height(),
        columns = frame.width(),
        "assembled district cube"
    );

    Ok(Cube {
        frame,
        domains: Domain::ALL.to_vec(),
    })
}

fn take_table(tables: &mut BTreeMap<Domain, DataFrame>, domain: Domain) -> Result<DataFrame> {
    let table = tables
        .remove(&domain)
        .ok_or(CubeError::MissingDomain(domain))?;
    if table.column(DISTRICT).is_err() {
        return Err(CubeError::MissingKey(domain));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One single-field table per domain, every domain keyed on `districts`.
    fn tables(districts: &[&str]) -> BTreeMap<Domain, DataFrame> {
        Domain::ALL
            .into_iter()
            .map(|domain| {
                let values: Vec<f64> = (0..districts.len()).map(|i| i as f64).collect();
                let df = DataFrame::new(vec![
                    Column::new(DISTRICT.into(), districts),
                    Column::new(format!("{}_value", domain.key()).into(), values),
                ])
                .unwrap();
                (domain, df)
            })
            .collect()
    }

    #[test]
    fn test_assemble_all_domains() {
        let cube = assemble(tables(&["North", "South"])).unwrap();
        assert_eq!(cube.district_count(), 2);
        assert_eq!(cube.columns().len(), 11);
        assert_eq!(cube.columns()[0], DISTRICT);
        assert_eq!(cube.columns()[1], "gm_5_6_value");
        assert_eq!(cube.columns()[10], "awc_value");
        assert_eq!(cube.domains(), &Domain::ALL);
    }

    #[test]
    fn test_anchor_order_preserved() {
        let mut input = tables(&["Zeta", "Alpha", "Mid"]);
        input.insert(
            Domain::Anaemia,
            df!(DISTRICT => ["Mid", "Zeta", "Alpha"], "anaemia_value" => [3.0, 1.0, 2.0]).unwrap(),
        );

        let cube = assemble(input).unwrap();
        assert_eq!(cube.districts().unwrap(), vec!["Zeta", "Alpha", "Mid"]);
        let anaemia = cube.frame().column("anaemia_value").unwrap().f64().unwrap();
        assert_eq!(anaemia.get(0), Some(1.0));
        assert_eq!(anaemia.get(2), Some(3.0));
    }

    #[test]
    fn test_repeated_keys_fan_out_in_anchor_order() {
        let build = || {
            let mut input = tables(&["North", "South"]);
            input.insert(
                Domain::Anaemia,
                df!(DISTRICT => ["North", "South", "North"], "anaemia_value" => [1.0, 2.0, 3.0])
                    .unwrap(),
            );
            assemble(input).unwrap()
        };

        let cube = build();
        assert_eq!(cube.districts().unwrap(), vec!["North", "North", "South"]);
        let anaemia = cube.frame().column("anaemia_value").unwrap().f64().unwrap();
        assert_eq!(anaemia.get(2), Some(2.0));

        for _ in 0..5 {
            assert!(build().frame().equals_missing(cube.frame()));
        }
    }

    #[test]
    fn test_missing_domain() {
        let mut input = tables(&["North"]);
        input.remove(&Domain::HomeVisit);
        let err = assemble(input).unwrap_err();
        assert!(matches!(err, CubeError::MissingDomain(Domain::HomeVisit)));
    }

    #[test]
    fn test_missing_key() {
        let mut input = tables(&["North"]);
        input.insert(Domain::AwcSummary, df!("name" => ["North"]).unwrap());
        let err = assemble(input).unwrap_err();
        assert!(matches!(err, CubeError::MissingKey(Domain::AwcSummary)));
    }

    #[test]
    fn test_column_collision() {
        let mut input = tables(&["North"]);
        input.insert(
            Domain::SnpProjections,
            df!(DISTRICT => ["North"], "lbw_value" => [1.0]).unwrap(),
        );
        let err = assemble(input).unwrap_err();
        assert!(matches!(
            err,
            CubeError::ColumnCollision { domain: Domain::SnpProjections, ref column } if column == "lbw_value"
        ));
    }

    #[test]
    fn test_from_frame_requires_district() {
        let df = df!("x" => [1.0]).unwrap();
        assert!(matches!(Cube::from_frame(df), Err(CubeError::MissingKey(_))));
    }
}
