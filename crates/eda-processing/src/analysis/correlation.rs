//! Pairwise Pearson correlation of numeric columns.

use crate::error::Result;
use crate::profiler::mean;
use crate::types::{CorrelationMatrix, DatasetSummary};
use crate::utils::{column_series, numeric_values};
use polars::prelude::*;
use tracing::debug;

/// Compute the Pearson correlation matrix over all numeric columns.
///
/// Each pair uses only the rows where both values are present. The
/// diagonal is always `1.0`; an off-diagonal entry is `None` when fewer than
/// two complete pairs exist or either side is constant over them.
pub fn correlation_matrix(df: &DataFrame, summary: &DatasetSummary) -> Result<CorrelationMatrix> {
    let columns: Vec<String> = summary
        .numeric_columns()
        .into_iter()
        .map(str::to_string)
        .collect();

    let series_values = columns
        .iter()
        .map(|name| numeric_values(column_series(df, name)?))
        .collect::<Result<Vec<_>>>()?;

    let size = columns.len();
    let mut values = vec![vec![None; size]; size];

    for i in 0..size {
        values[i][i] = Some(1.0);
        for j in (i + 1)..size {
            let r = pearson_pairwise(&series_values[i], &series_values[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    debug!("Computed correlation matrix for {} numeric columns", size);
    Ok(CorrelationMatrix { columns, values })
}

/// Pearson coefficient over pairwise-complete observations.
pub fn pearson_pairwise(a: &[Option<f64>], b: &[Option<f64>]) -> Option<f64> {
    let (x, y): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b.iter())
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if x.len() < 2 {
        return None;
    }

    let mean_x = mean(&x);
    let mean_y = mean(&y);

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }

    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
