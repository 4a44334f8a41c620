//! PNG charts rendered with `plotters`.
//!
//! Charts carry no text: titles, axis names and legends are written next to
//! the image in the Markdown report.

use crate::error::{EdaError, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

/// Number of bins used for histograms.
pub const HISTOGRAM_BINS: usize = 20;

/// Rows are grouped into at most this many horizontal bands in the missing matrix.
pub const MAX_ROW_BUCKETS: usize = 200;

const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);
const PRESENT_COLOR: RGBColor = RGBColor(235, 235, 235);
const MISSING_COLOR: RGBColor = RGBColor(40, 40, 40);
const NEGATIVE_COLOR: RGBColor = RGBColor(59, 76, 192);
const POSITIVE_COLOR: RGBColor = RGBColor(180, 4, 38);
const UNDEFINED_COLOR: RGBColor = RGBColor(200, 200, 200);

fn plot_error<E: std::fmt::Display>(name: &str) -> impl Fn(E) -> EdaError + '_ {
    move |e| EdaError::Plot {
        name: name.to_string(),
        reason: e.to_string(),
    }
}

/// A histogram bin: `[start, end)` and the number of values inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Split values into `bins` equal-width bins.
///
/// A constant column gets a unit-wide range centered on its value. The last
/// bin is closed on the right so the maximum is counted.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Share of missing cells in each row band of a column mask.
pub fn missing_buckets(mask: &[bool], buckets: usize) -> Vec<f64> {
    let n = mask.len();
    if n == 0 || buckets == 0 {
        return Vec::new();
    }
    let buckets = buckets.min(n);

    (0..buckets)
        .map(|b| {
            let start = b * n / buckets;
            let end = ((b + 1) * n / buckets).max(start + 1);
            let missing = mask[start..end].iter().filter(|m| **m).count();
            missing as f64 / (end - start) as f64
        })
        .collect()
}

fn blend(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Blue for negative, red for positive, white at zero, grey when undefined.
pub fn diverging_color(value: Option<f64>) -> RGBColor {
    match value {
        None => UNDEFINED_COLOR,
        Some(r) if r < 0.0 => blend(WHITE, NEGATIVE_COLOR, -r),
        Some(r) => blend(WHITE, POSITIVE_COLOR, r),
    }
}

/// Render a histogram of `values` to `path`.
pub fn draw_histogram(values: &[f64], path: &Path) -> Result<()> {
    let name = path.display().to_string();
    let bins = histogram_bins(values, HISTOGRAM_BINS);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Err(EdaError::Plot {
            name,
            reason: "no values to plot".to_string(),
        });
    };
    let x_range = first.start..last.end;
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(1).max(1) as f64 * 1.05;

    let root = BitMapBackend::new(path, (640, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(&name))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(x_range, 0f64..y_max)
        .map_err(plot_error(&name))?;

    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], BAR_COLOR.filled())
        }))
        .map_err(plot_error(&name))?;
    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], WHITE.stroke_width(1))
        }))
        .map_err(plot_error(&name))?;

    root.present().map_err(plot_error(&name))?;
    debug!("Histogram saved: {}", name);
    Ok(())
}

/// Render the missing-value matrix: one vertical strip per column, rows
/// top to bottom, darker where more cells are missing.
///
/// `masks[c][r]` is `true` when row `r` of column `c` is missing.
pub fn draw_missing_matrix(masks: &[Vec<bool>], path: &Path) -> Result<()> {
    let name = path.display().to_string();
    let n_cols = masks.len().max(1);
    let bands: Vec<Vec<f64>> = masks
        .iter()
        .map(|mask| missing_buckets(mask, MAX_ROW_BUCKETS))
        .collect();
    let n_bands = bands.iter().map(Vec::len).max().unwrap_or(0).max(1);

    let width = (n_cols as u32 * 24).clamp(240, 1600);
    let root = BitMapBackend::new(path, (width, 400)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(&name))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0f64..n_cols as f64, 0f64..n_bands as f64)
        .map_err(plot_error(&name))?;

    let cells = bands.iter().enumerate().flat_map(|(c, column)| {
        column.iter().enumerate().map(move |(b, share)| {
            // first rows at the top
            let top = (n_bands - b) as f64;
            let x = c as f64;
            Rectangle::new(
                [(x + 0.05, top - 1.0), (x + 0.95, top)],
                blend(PRESENT_COLOR, MISSING_COLOR, *share).filled(),
            )
        })
    });
    chart.draw_series(cells).map_err(plot_error(&name))?;

    root.present().map_err(plot_error(&name))?;
    debug!("Missing matrix saved: {}", name);
    Ok(())
}

/// Render a correlation heatmap; row `i` is drawn at the top.
pub fn draw_correlation_heatmap(values: &[Vec<Option<f64>>], path: &Path) -> Result<()> {
    let name = path.display().to_string();
    let n = values.len().max(1);
    let side = (n as u32 * 40).clamp(240, 1200);

    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error(&name))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)
        .map_err(plot_error(&name))?;

    let cells = values.iter().enumerate().flat_map(|(i, row)| {
        row.iter().enumerate().map(move |(j, r)| {
            let y = (n - 1 - i) as f64;
            let x = j as f64;
            Rectangle::new([(x, y), (x + 1.0, y + 1.0)], diverging_color(*r).filled())
        })
    });
    chart.draw_series(cells).map_err(plot_error(&name))?;

    root.present().map_err(plot_error(&name))?;
    debug!("Correlation heatmap saved: {}", name);
    Ok(())
}
