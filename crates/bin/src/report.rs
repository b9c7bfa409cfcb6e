//! Text and JSON rendering for command output.

use poshan_cube::LookupMatch;
use poshan_data::TableProfile;
use polars::prelude::*;
use serde_json::{Map, Value, json};

/// Output format of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Format {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

const RULE: &str = "────────────────────────────────────────────────────────────────";

fn cell(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Float64(v) if v.is_finite() => json!(v),
        AnyValue::Float32(v) if v.is_finite() => json!(v),
        AnyValue::Float64(_) | AnyValue::Float32(_) => Value::Null,
        AnyValue::Int64(v) => json!(v),
        AnyValue::Int32(v) => json!(v),
        AnyValue::UInt32(v) => json!(v),
        AnyValue::UInt64(v) => json!(v),
        AnyValue::Boolean(v) => json!(v),
        AnyValue::String(v) => json!(v),
        AnyValue::StringOwned(v) => json!(v.as_str()),
        other => json!(other.to_string()),
    }
}

/// First row of `df` as a JSON object, in column order.
pub(crate) fn row_to_json(df: &DataFrame) -> PolarsResult<Value> {
    let mut object = Map::new();
    for column in df.get_columns() {
        let value = if df.height() == 0 {
            Value::Null
        } else {
            cell(column.get(0)?)
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(object))
}

/// Print a table profile.
pub(crate) fn print_profile(source: &str, profile: &TableProfile, format: Format) {
    match format {
        Format::Json => println!("{}", json!({ "source": source, "profile": profile })),
        Format::Text => {
            println!("\n{source}");
            println!("{RULE}");
            println!("Rows: {}   Columns: {}\n", profile.rows, profile.columns.len());
            println!("{:<48} {:>8} {:>8}", "column", "dtype", "nulls");
            for column in &profile.columns {
                println!("{:<48} {:>8} {:>8}", column.name, column.dtype, column.nulls);
            }
            println!();
        }
    }
}

/// Print a resolved district and its values.
pub(crate) fn print_lookup(
    month: &str,
    hit: &LookupMatch,
    row: &DataFrame,
    format: Format,
) -> PolarsResult<()> {
    let values = row_to_json(row)?;
    match format {
        Format::Json => println!(
            "{}",
            json!({ "month": month, "match": hit, "values": values })
        ),
        Format::Text => {
            println!("\n{} ({month}, {:?} match)", hit.district, hit.stage);
            println!("{RULE}");
            if let Value::Object(values) = values {
                for (name, value) in values {
                    let shown = match value {
                        Value::Null => "-".to_string(),
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    println!("{name:<40} {shown:>20}");
                }
            }
            println!();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_json_keeps_column_order() {
        let df = df!(
            "district" => ["North"],
            "lbw_rate_pct" => [0.09],
            "sam_ratio" => [None::<f64>],
        )
        .unwrap();

        let value = row_to_json(&df).unwrap();
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["district", "lbw_rate_pct", "sam_ratio"]);
        assert_eq!(object["district"], json!("North"));
        assert_eq!(object["lbw_rate_pct"], json!(0.09));
        assert_eq!(object["sam_ratio"], Value::Null);
    }

    #[test]
    fn test_non_finite_renders_null() {
        let df = df!("x" => [f64::NAN]).unwrap();
        assert_eq!(row_to_json(&df).unwrap()["x"], Value::Null);
    }
}
