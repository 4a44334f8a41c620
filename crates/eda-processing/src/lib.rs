//! Exploratory data analysis for CSV files.
//!
//! A small profiling library built with Rust and Polars.
//!
//! # Overview
//!
//! - **Loading**: CSV with a configurable separator and text encoding
//! - **Summaries**: per-column type inference, missingness, distinct counts
//!   and numeric statistics
//! - **Quality**: heuristic flags and a quality score in `[0, 1]`
//! - **Analysis**: Pearson correlation of numeric columns, top categories
//! - **Reporting**: CSV tables, PNG charts and a Markdown report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use eda_processing::{LoadOptions, QualityThresholds, load_csv};
//! use eda_processing::{compute_quality_flags, missing_table, summarize_dataset};
//!
//! let df = load_csv("data/example.csv", &LoadOptions::default())?;
//! let summary = summarize_dataset(&df)?;
//! let missing = missing_table(&df)?;
//! let flags = compute_quality_flags(&summary, &missing, &QualityThresholds::default());
//!
//! println!("{} rows, quality score {:.2}", summary.n_rows, flags.quality_score);
//! ```
//!
//! # Configuration
//!
//! Use [`ReportOptions`] to customize the report:
//!
//! ```rust,ignore
//! use eda_processing::{QualityThresholds, ReportOptions, ReportGenerator};
//!
//! let options = ReportOptions::builder()
//!     .out_dir("reports/titanic")
//!     .title("Titanic")
//!     .max_hist_columns(4)
//!     .top_k_categories(10)
//!     .thresholds(QualityThresholds::builder().min_rows(500).build()?)
//!     .build()?;
//!
//! let artifacts = ReportGenerator::generate(&df, &options)?;
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod loader;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{correlation_matrix, pearson_pairwise, top_categories, top_k_values};
pub use config::{ConfigValidationError, LoadOptions, QualityThresholds, ReportOptions};
pub use error::{EdaError, Result as EdaResult, ResultExt};
pub use loader::{load_csv, load_csv_from_bytes};
pub use profiler::{DataProfiler, flatten_summary, missing_table, summarize_dataset, type_counts};
pub use quality::{DatasetShape, QualityScorer, compute_quality_flags, quality_score};
pub use reporting::{ReportArtifacts, ReportGenerator};
pub use types::{
    CategoryCount, ColumnSummary, ColumnTopCategories, ColumnType, CorrelationMatrix,
    DatasetSummary, MissingEntry, MissingTable, NumericStats, QualityAssessment, QualityFlags,
    SummaryRow, TopCategories,
};
pub use utils::{DtypeCategory, get_dtype_category, is_missing_str, parse_numeric_string};
