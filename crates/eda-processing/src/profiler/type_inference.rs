//! Type inference logic for column analysis.

use crate::types::ColumnType;
use crate::utils::{DtypeCategory, get_dtype_category, is_numeric_string};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

// Date pattern regexes - compiled once at startup
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/.]\d{1,2}[-/.]\d{4}$").expect("Invalid regex: DD-MM-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}(:\d{2})?").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2})?").expect("Invalid regex: ISO"),
    ]
});

/// Infer the logical type of a column.
///
/// Native dtypes decide directly. Text columns are numeric when every
/// non-missing cell coerces to a number, boolean when every cell is
/// `true`/`false`, datetime when every cell looks like a date, and
/// categorical otherwise. A column without any value is numeric, as a column
/// of nulls reads as floats.
pub(crate) fn infer_column_type(series: &Series, values: &[Option<String>]) -> ColumnType {
    match get_dtype_category(series.dtype()) {
        DtypeCategory::Numeric => return ColumnType::Numeric,
        DtypeCategory::Boolean => return ColumnType::Boolean,
        DtypeCategory::Datetime => return ColumnType::Datetime,
        DtypeCategory::String | DtypeCategory::Other => {}
    }

    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
    if present.is_empty() || present.iter().all(|v| is_numeric_string(v)) {
        return ColumnType::Numeric;
    }

    if present.iter().all(|v| is_boolean_literal(v)) {
        return ColumnType::Boolean;
    }

    if present.iter().all(|v| is_date_like(v)) {
        return ColumnType::Datetime;
    }

    ColumnType::Categorical
}

fn is_boolean_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

fn is_date_like(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(value))
}
