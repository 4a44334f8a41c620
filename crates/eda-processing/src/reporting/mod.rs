//! Report generation module.
//!
//! [`ReportGenerator::generate`] runs the whole analysis on a loaded
//! dataset and writes the results into an output directory:
//!
//! - `summary.csv`, `missing.csv`, `correlation.csv`, `top_categories.csv`
//! - `quality.json` with the quality flags and score
//! - `hist_<column>.png` for the first numeric columns
//! - `missing_matrix.png` and, when numeric columns exist, `correlation_heatmap.png`
//! - `report.md` tying everything together
//!
//! # Example
//!
//! ```rust,ignore
//! use eda_processing::{LoadOptions, ReportOptions, load_csv};
//! use eda_processing::reporting::ReportGenerator;
//!
//! let df = load_csv("data/example.csv", &LoadOptions::default())?;
//! let options = ReportOptions::builder().out_dir("reports").build()?;
//! let artifacts = ReportGenerator::generate(&df, &options)?;
//! println!("{}", artifacts.report_path.display());
//! ```

mod generator;
mod markdown;
mod plots;

pub use generator::{
    CORRELATION_FILE, CORRELATION_HEATMAP_FILE, MISSING_FILE, MISSING_MATRIX_FILE, QUALITY_FILE,
    REPORT_FILE, ReportArtifacts, ReportGenerator, SUMMARY_FILE, TOP_CATEGORIES_FILE,
    correlation_frame, missing_frame, summary_frame, top_categories_frame,
};
pub use markdown::{ReportContent, markdown_table, render_report};
pub use plots::{
    Bin, HISTOGRAM_BINS, draw_correlation_heatmap, draw_histogram, draw_missing_matrix,
    histogram_bins,
};
