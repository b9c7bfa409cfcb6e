//! Safe-ratio arithmetic shared by every domain.
//!
//! A ratio over a zero or missing denominator is defined as `0`, and so is any
//! non-numeric or non-finite result. Derived fields are therefore always
//! numeric. Each field is rounded to its [`Precision`] afterwards.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Rounding applied to a derived field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Percentage-like indicators, 2 decimals
    Percent,
    /// Unitless risk-density ratios and rates, 3 decimals
    Ratio,
}

impl Precision {
    /// Number of decimal places kept.
    pub const fn decimals(self) -> u32 {
        match self {
            Self::Percent => 2,
            Self::Ratio => 3,
        }
    }
}

/// Scalar safe ratio, before rounding.
pub fn safe_ratio(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => {
            let ratio = n / d;
            if ratio.is_finite() { ratio } else { 0.0 }
        }
        _ => 0.0,
    }
}

/// Round a scalar to `precision`.
pub fn round_to(value: f64, precision: Precision) -> f64 {
    let factor = 10f64.powi(precision.decimals() as i32);
    (value * factor).round() / factor
}

/// Replace null, NaN and ±inf with `0`.
pub fn finite_or_zero(expr: Expr) -> Expr {
    when(expr.clone().is_finite())
        .then(expr)
        .otherwise(lit(0.0))
}

/// Expression form of [`safe_ratio`].
pub fn ratio(numerator: Expr, denominator: Expr) -> Expr {
    let numerator = numerator.cast(DataType::Float64);
    let denominator = denominator.cast(DataType::Float64);

    when(denominator.clone().is_null().or(denominator.clone().eq(lit(0.0))))
        .then(lit(0.0))
        .otherwise(finite_or_zero(numerator / denominator))
}

/// Round an expression to `precision`.
pub fn rounded(expr: Expr, precision: Precision) -> Expr {
    expr.round(precision.decimals())
}

/// Safe ratio of two columns, rounded and aliased as `name`.
pub fn ratio_field(name: &str, numerator: &str, denominator: &str, precision: Precision) -> Expr {
    rounded(ratio(col(numerator), col(denominator)), precision).alias(name)
}
