//! Shared utilities for column inspection.
//!
//! This module contains helpers used across the profiler, the analyzers and
//! the report renderer so that missingness and numeric coercion follow the
//! same rules everywhere.

use crate::error::{EdaError, Result};
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a physical data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Null) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Tokens read as missing values, matching the usual CSV NA conventions.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check if a raw cell value counts as missing: empty, whitespace-only or
/// one of the [`NA_MARKERS`].
///
/// # Example
///
/// ```rust,ignore
/// use eda_processing::utils::is_missing_str;
///
/// assert!(is_missing_str("  "));
/// assert!(is_missing_str("NA"));
/// assert!(!is_missing_str("0"));
/// ```
pub fn is_missing_str(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || NA_MARKERS.contains(&trimmed)
}

/// Try to coerce a cell to a finite number.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if a string can be coerced to a number.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

// =============================================================================
// Series Extraction Utilities
// =============================================================================

/// Look up a column by name as a materialized series.
pub fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    df.column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| EdaError::ColumnNotFound(name.to_string()))
}

/// Extract a column as text cells, with missing cells mapped to `None`.
pub fn string_values(series: &Series) -> Result<Vec<Option<String>>> {
    let casted = series.cast(&DataType::String)?;
    let values = casted
        .str()?
        .into_iter()
        .map(|value| match value {
            Some(v) if !is_missing_str(v) => Some(v.trim().to_string()),
            _ => None,
        })
        .collect();
    Ok(values)
}

/// Extract a column as numbers, with missing or non-numeric cells mapped to `None`.
///
/// Native numeric columns are cast to `f64` (NaN counts as missing); text
/// columns are coerced cell by cell.
pub fn numeric_values(series: &Series) -> Result<Vec<Option<f64>>> {
    if is_numeric_dtype(series.dtype()) {
        let casted = series.cast(&DataType::Float64)?;
        let values = casted
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect();
        return Ok(values);
    }

    Ok(string_values(series)?
        .into_iter()
        .map(|value| value.as_deref().and_then(parse_numeric_string))
        .collect())
}

/// Per-cell missing flags of a column.
///
/// Native numeric columns treat non-finite values (NaN, ±inf) as missing;
/// every other column goes through the text NA markers.
pub fn missing_mask(series: &Series) -> Result<Vec<bool>> {
    if is_numeric_dtype(series.dtype()) {
        return Ok(numeric_values(series)?.iter().map(Option::is_none).collect());
    }
    Ok(string_values(series)?.iter().map(Option::is_none).collect())
}

/// Count missing cells of a column.
pub fn missing_count(series: &Series) -> Result<usize> {
    Ok(missing_mask(series)?.into_iter().filter(|m| *m).count())
}

/// Share of `count` in `total`, defined as 0.0 when `total` is zero.
#[inline]
pub fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64).clamp(0.0, 1.0)
    }
}
