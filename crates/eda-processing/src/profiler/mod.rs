//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for summarizing datasets, including:
//! - Type inference for columns
//! - Missingness and distinct counts
//! - Basic numeric statistics

mod statistics;
mod type_inference;

use crate::error::{EdaError, Result};
use crate::types::{
    ColumnSummary, ColumnType, DatasetSummary, MissingEntry, MissingTable, SummaryRow,
};
use crate::utils::{missing_count, missing_mask, numeric_values, share, string_values};
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

pub(crate) use statistics::mean;
pub(crate) use type_inference::infer_column_type;

/// Data profiler for analyzing dataset structure and characteristics.
pub struct DataProfiler;

impl DataProfiler {
    /// Summarize an entire dataset.
    ///
    /// Fails with [`EdaError::EmptyDataset`] when the frame has no columns.
    pub fn summarize_dataset(df: &DataFrame) -> Result<DatasetSummary> {
        if df.width() == 0 {
            return Err(EdaError::EmptyDataset);
        }

        let columns = df
            .get_columns()
            .iter()
            .map(|column| Self::summarize_column(column.as_materialized_series(), df.height()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Summarized {} columns over {} rows",
            columns.len(),
            df.height()
        );

        Ok(DatasetSummary {
            n_rows: df.height(),
            n_cols: df.width(),
            columns,
        })
    }

    fn summarize_column(series: &Series, n_rows: usize) -> Result<ColumnSummary> {
        let texts: Vec<Option<String>> = string_values(series)?
            .into_iter()
            .zip(missing_mask(series)?)
            .map(|(text, is_missing)| if is_missing { None } else { text })
            .collect();
        let inferred_type = infer_column_type(series, &texts);
        let missing = texts.iter().filter(|v| v.is_none()).count();

        let (distinct, numeric) = if inferred_type.is_numeric() {
            let numbers: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
            let distinct = numbers
                .iter()
                .map(|v| normalize_zero(*v).to_bits())
                .collect::<HashSet<_>>()
                .len();
            (distinct, statistics::numeric_stats(&numbers))
        } else {
            let distinct = texts.iter().flatten().collect::<HashSet<_>>().len();
            (distinct, None)
        };

        Ok(ColumnSummary {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            inferred_type,
            non_missing: n_rows - missing,
            missing,
            missing_share: share(missing, n_rows),
            distinct,
            example: texts.into_iter().flatten().next(),
            numeric,
        })
    }

    /// Per-column missing counts and shares.
    pub fn missing_table(df: &DataFrame) -> Result<MissingTable> {
        let n_rows = df.height();
        let entries = df
            .get_columns()
            .iter()
            .map(|column| -> Result<MissingEntry> {
                let series = column.as_materialized_series();
                let missing_count = missing_count(series)?;
                Ok(MissingEntry {
                    column: series.name().to_string(),
                    missing_count,
                    missing_share: share(missing_count, n_rows),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MissingTable { n_rows, entries })
    }

    /// Flatten a summary into printable rows, one per column.
    pub fn flatten_summary(summary: &DatasetSummary) -> Vec<SummaryRow> {
        summary
            .columns
            .iter()
            .map(|col| SummaryRow {
                name: col.name.clone(),
                dtype: col.dtype.clone(),
                inferred_type: col.inferred_type.to_string(),
                non_null: col.non_missing,
                missing: col.missing,
                missing_share: col.missing_share,
                unique: col.distinct,
                example: col.example.clone().unwrap_or_default(),
                min: col.numeric.as_ref().map(|s| s.min),
                max: col.numeric.as_ref().map(|s| s.max),
                mean: col.numeric.as_ref().map(|s| s.mean),
                std: col.numeric.as_ref().and_then(|s| s.std),
            })
            .collect()
    }
}

// -0.0 and 0.0 are the same value for distinct counting
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Shorthand for [`DataProfiler::summarize_dataset`].
pub fn summarize_dataset(df: &DataFrame) -> Result<DatasetSummary> {
    DataProfiler::summarize_dataset(df)
}

/// Shorthand for [`DataProfiler::missing_table`].
pub fn missing_table(df: &DataFrame) -> Result<MissingTable> {
    DataProfiler::missing_table(df)
}

/// Shorthand for [`DataProfiler::flatten_summary`].
pub fn flatten_summary(summary: &DatasetSummary) -> Vec<SummaryRow> {
    DataProfiler::flatten_summary(summary)
}

/// Count the columns of each inferred type.
pub fn type_counts(summary: &DatasetSummary) -> Vec<(ColumnType, usize)> {
    [
        ColumnType::Numeric,
        ColumnType::Categorical,
        ColumnType::Boolean,
        ColumnType::Datetime,
    ]
    .into_iter()
    .map(|t| (t, summary.columns_of_type(t).len()))
    .filter(|(_, count)| *count > 0)
    .collect()
}
