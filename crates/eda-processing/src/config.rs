//! Configuration types for loading, scoring and reporting.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default minimum number of rows before a dataset is flagged as too small.
pub const DEFAULT_MIN_ROWS: usize = 100;

/// Default maximum tolerated missing share in any single column.
pub const DEFAULT_MAX_MISSING_SHARE: f64 = 0.5;

/// Thresholds used by the quality scorer.
///
/// Use [`QualityThresholds::builder()`] to override individual values.
///
/// # Example
///
/// ```rust,ignore
/// use eda_processing::config::QualityThresholds;
///
/// let thresholds = QualityThresholds::builder()
///     .min_rows(500)
///     .max_missing_share(0.3)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityThresholds {
    /// Datasets with fewer rows than this are flagged `too_few_rows`.
    /// Default: 100
    pub min_rows: usize,

    /// Datasets where any column's missing share exceeds this value are
    /// flagged `too_many_missing` (0.0 - 1.0).
    /// Default: 0.5
    pub max_missing_share: f64,

    /// Distinct/non-missing ratio above which a categorical column counts as
    /// high-cardinality (0.0 - 1.0).
    /// Default: 0.9
    pub high_cardinality_share: f64,

    /// Minimum number of non-missing values before the cardinality ratio is
    /// considered meaningful.
    /// Default: 20
    pub high_cardinality_min_values: usize,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            max_missing_share: DEFAULT_MAX_MISSING_SHARE,
            high_cardinality_share: 0.9,
            high_cardinality_min_values: 20,
        }
    }
}

impl QualityThresholds {
    /// Create a new thresholds builder.
    pub fn builder() -> QualityThresholdsBuilder {
        QualityThresholdsBuilder::default()
    }

    /// Validate the thresholds and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.max_missing_share) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "max_missing_share".to_string(),
                value: self.max_missing_share,
            });
        }

        if !(0.0..=1.0).contains(&self.high_cardinality_share) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "high_cardinality_share".to_string(),
                value: self.high_cardinality_share,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },

    #[error("Report title must not be empty")]
    EmptyTitle,
}

/// Builder for [`QualityThresholds`] with fluent API.
#[derive(Debug, Default)]
pub struct QualityThresholdsBuilder {
    min_rows: Option<usize>,
    max_missing_share: Option<f64>,
    high_cardinality_share: Option<f64>,
    high_cardinality_min_values: Option<usize>,
}

impl QualityThresholdsBuilder {
    /// Set the minimum row count.
    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = Some(rows);
        self
    }

    /// Set the maximum tolerated missing share per column.
    ///
    /// # Arguments
    /// * `share` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn max_missing_share(mut self, share: f64) -> Self {
        self.max_missing_share = Some(share);
        self
    }

    /// Set the distinct ratio that marks a categorical column as high-cardinality.
    pub fn high_cardinality_share(mut self, share: f64) -> Self {
        self.high_cardinality_share = Some(share);
        self
    }

    /// Set the minimum sample size for the cardinality check.
    pub fn high_cardinality_min_values(mut self, values: usize) -> Self {
        self.high_cardinality_min_values = Some(values);
        self
    }

    /// Build the thresholds.
    ///
    /// Returns validated `QualityThresholds` or an error if validation fails.
    pub fn build(self) -> Result<QualityThresholds, ConfigValidationError> {
        let defaults = QualityThresholds::default();
        let thresholds = QualityThresholds {
            min_rows: self.min_rows.unwrap_or(defaults.min_rows),
            max_missing_share: self
                .max_missing_share
                .unwrap_or(defaults.max_missing_share),
            high_cardinality_share: self
                .high_cardinality_share
                .unwrap_or(defaults.high_cardinality_share),
            high_cardinality_min_values: self
                .high_cardinality_min_values
                .unwrap_or(defaults.high_cardinality_min_values),
        };

        thresholds.validate()?;
        Ok(thresholds)
    }
}

/// Options controlling how a delimited file is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Field separator byte.
    /// Default: b','
    pub separator: u8,

    /// Encoding label understood by `encoding_rs` (e.g. "utf-8", "cp1251").
    /// Default: "utf-8"
    pub encoding: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: "utf-8".to_string(),
        }
    }
}

impl LoadOptions {
    /// Build load options from command-line style strings.
    ///
    /// The separator must be a single one-byte character; `\t` and `tab`
    /// are accepted as aliases for a tab.
    pub fn from_cli(sep: &str, encoding: &str) -> crate::error::Result<Self> {
        let separator = match sep {
            "\\t" | "tab" => b'\t',
            s if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
            other => {
                return Err(crate::error::EdaError::InvalidParameter(format!(
                    "separator must be a single ASCII character, got '{}'",
                    other
                )));
            }
        };

        let encoding = encoding.trim();
        if encoding.is_empty() {
            return Err(crate::error::EdaError::InvalidParameter(
                "encoding must not be empty".to_string(),
            ));
        }

        Ok(Self {
            separator,
            encoding: encoding.to_string(),
        })
    }
}

/// Options for the `report` command.
///
/// Use [`ReportOptions::builder()`] to create a new configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Directory the report files are written to.
    /// Default: "reports"
    pub out_dir: PathBuf,

    /// Title of the Markdown report.
    /// Default: "EDA Report"
    pub title: String,

    /// Maximum number of numeric columns that get a histogram.
    /// Default: 6
    pub max_hist_columns: usize,

    /// Number of top values listed per categorical column.
    /// Default: 5
    pub top_k_categories: usize,

    /// Maximum number of categorical columns in the top-values table.
    /// If None, every categorical column is included.
    /// Default: None
    pub max_category_columns: Option<usize>,

    /// Thresholds for the quality flags.
    pub thresholds: QualityThresholds,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("reports"),
            title: "EDA Report".to_string(),
            max_hist_columns: 6,
            top_k_categories: 5,
            max_category_columns: None,
            thresholds: QualityThresholds::default(),
        }
    }
}

impl ReportOptions {
    /// Create a new report options builder.
    pub fn builder() -> ReportOptionsBuilder {
        ReportOptionsBuilder::default()
    }

    /// Validate the options and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.title.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTitle);
        }

        if self.top_k_categories == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "top_k_categories".to_string(),
                value: self.top_k_categories,
            });
        }

        if let Some(0) = self.max_category_columns {
            return Err(ConfigValidationError::InvalidCount {
                field: "max_category_columns".to_string(),
                value: 0,
            });
        }

        self.thresholds.validate()
    }
}

/// Builder for [`ReportOptions`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportOptionsBuilder {
    out_dir: Option<PathBuf>,
    title: Option<String>,
    max_hist_columns: Option<usize>,
    top_k_categories: Option<usize>,
    max_category_columns: Option<usize>,
    thresholds: Option<QualityThresholds>,
}

impl ReportOptionsBuilder {
    /// Set the output directory.
    pub fn out_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(path.into());
        self
    }

    /// Set the report title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the maximum number of histograms (0 disables histograms).
    pub fn max_hist_columns(mut self, columns: usize) -> Self {
        self.max_hist_columns = Some(columns);
        self
    }

    /// Set the number of top values per categorical column.
    pub fn top_k_categories(mut self, k: usize) -> Self {
        self.top_k_categories = Some(k);
        self
    }

    /// Limit the number of categorical columns in the top-values table.
    pub fn max_category_columns(mut self, columns: usize) -> Self {
        self.max_category_columns = Some(columns);
        self
    }

    /// Set the quality thresholds.
    pub fn thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Build the options.
    ///
    /// Returns validated `ReportOptions` or an error if validation fails.
    pub fn build(self) -> Result<ReportOptions, ConfigValidationError> {
        let defaults = ReportOptions::default();
        let options = ReportOptions {
            out_dir: self.out_dir.unwrap_or(defaults.out_dir),
            title: self.title.unwrap_or(defaults.title),
            max_hist_columns: self.max_hist_columns.unwrap_or(defaults.max_hist_columns),
            top_k_categories: self.top_k_categories.unwrap_or(defaults.top_k_categories),
            max_category_columns: self.max_category_columns,
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
        };

        options.validate()?;
        Ok(options)
    }
}
