//! The contract shared by every domain analyzer.

use crate::domain::Domain;
use crate::error::{DomainError, Result};
use crate::schema::{FieldSet, FieldSpec, resolve};
use poshan_data::{DISTRICT, HeaderRules, canonicalize_column, load, normalize_headers};
use polars::prelude::*;
use std::fmt::Debug;
use std::path::Path;
use tracing::info;

/// Turns one domain extract into a per-district indicator table.
///
/// Implementors declare how headers are normalized, the explicit schema, and
/// the derived indicators. The provided [`analyze`](Self::analyze) and
/// [`analyze_frame`](Self::analyze_frame) run the full pipeline:
/// normalize headers → resolve schema → derive → canonicalize district.
pub trait DomainAnalyzer: Debug {
    /// Domain handled by this analyzer.
    fn domain(&self) -> Domain;

    /// Header normalization variant for this domain's extract.
    fn header_rules(&self) -> HeaderRules {
        HeaderRules::BASE
    }

    /// Normalized source header → internal field mapping.
    fn schema(&self) -> &'static [FieldSpec];

    /// Fields added by [`derive`](Self::derive), all numeric and non-null.
    fn derived_fields(&self) -> &'static [&'static str];

    /// Add the derived indicators to the resolved table.
    ///
    /// `fields` lists the schema fields that were found, for domains whose
    /// formulas depend on optional source columns.
    fn derive(&self, data: LazyFrame, fields: &FieldSet) -> Result<LazyFrame>;

    /// Load `path` and analyze it.
    fn analyze(&self, path: &Path) -> Result<DataFrame> {
        let raw = load(path).map_err(|e| DomainError::from_data(self.domain(), e))?;
        self.analyze_frame(raw)
    }

    /// Analyze an already loaded raw table.
    fn analyze_frame(&self, raw: DataFrame) -> Result<DataFrame> {
        let domain = self.domain();
        if raw.height() == 0 {
            return Err(DomainError::EmptySource {
                domain,
                detail: "table has no rows".to_string(),
            });
        }

        let normalized = normalize_headers(raw, self.header_rules())
            .map_err(|e| DomainError::from_data(domain, e))?;
        let resolved = resolve(domain, self.schema(), &normalized)?;

        let mut df = self
            .derive(resolved.data, &resolved.fields)?
            .collect()
            .map_err(|e| DomainError::compute(domain, e))?;
        canonicalize_column(&mut df, DISTRICT).map_err(|e| DomainError::from_data(domain, e))?;

        info!(domain = %domain, rows = df.height(), columns = df.width(), "analyzed domain");
        Ok(df)
    }

    /// Every internal field this analyzer can emit, besides `district`.
    fn output_fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<&'static str> = self.schema().iter().map(|spec| spec.field).collect();
        for &derived in self.derived_fields() {
            if !fields.contains(&derived) {
                fields.push(derived);
            }
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &[FieldSpec] = &[FieldSpec::exact("total_aww", &["total_aww"])];

    /// Derives from a column the schema never projects.
    #[derive(Debug)]
    struct Broken;

    impl DomainAnalyzer for Broken {
        fn domain(&self) -> Domain {
            Domain::HomeVisit
        }

        fn schema(&self) -> &'static [FieldSpec] {
            SCHEMA
        }

        fn derived_fields(&self) -> &'static [&'static str] {
            &["share"]
        }

        fn derive(&self, data: LazyFrame, _fields: &FieldSet) -> Result<LazyFrame> {
            Ok(data.with_column((col("total_aww") / col("not_projected")).alias("share")))
        }
    }

    #[test]
    fn test_compute_failure_names_domain() {
        let raw = df!("District" => ["North"], "Total AWW" => [4.0]).unwrap();
        let err = Broken.analyze_frame(raw).unwrap_err();

        assert!(matches!(err, DomainError::Compute { domain: Domain::HomeVisit, .. }));
        assert_eq!(err.domain(), Some(Domain::HomeVisit));
        assert!(err.to_string().starts_with("hv: "));
    }
}
