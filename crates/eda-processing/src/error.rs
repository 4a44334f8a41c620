//! Custom error types for the EDA toolkit.
//!
//! This module provides the error hierarchy using `thiserror`. Errors are
//! serializable so the HTTP service can return them as JSON bodies.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for loading, summarizing and reporting.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The dataset has no columns, so there is nothing to summarize.
    #[error("Dataset is empty: no columns to analyze")]
    EmptyDataset,

    /// Input file does not exist.
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// Input could not be parsed as delimited text.
    #[error("Failed to read CSV: {0}")]
    InvalidCsv(String),

    /// A user-supplied parameter (separator, encoding, request field) is invalid.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// Rendering a plot failed.
    #[error("Failed to render plot '{name}': {reason}")]
    Plot { name: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for API clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDataset => "EMPTY_DATASET",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::InvalidCsv(_) => "INVALID_CSV",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Plot { .. } => "PLOT_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the caller's input rather than by
    /// an internal failure. The CLI reports these as parameter errors and the
    /// HTTP service maps them to `400 Bad Request`.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::EmptyDataset
            | Self::FileNotFound(_)
            | Self::InvalidCsv(_)
            | Self::InvalidParameter(_)
            | Self::InvalidConfig(_)
            | Self::ColumnNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl From<crate::config::ConfigValidationError> for EdaError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        EdaError::InvalidConfig(err.to_string())
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(EdaError::EmptyDataset.error_code(), "EMPTY_DATASET");
        assert_eq!(
            EdaError::InvalidCsv("bad quote".to_string()).error_code(),
            "INVALID_CSV"
        );
    }

    #[test]
    fn test_is_user_error() {
        assert!(EdaError::EmptyDataset.is_user_error());
        assert!(EdaError::FileNotFound(PathBuf::from("missing.csv")).is_user_error());
        assert!(!EdaError::ReportGenerationFailed("disk full".to_string()).is_user_error());
        assert!(
            !EdaError::Plot {
                name: "histogram".to_string(),
                reason: "backend".to_string()
            }
            .is_user_error()
        );
    }

    #[test]
    fn test_error_serialization() {
        let error = EdaError::FileNotFound(PathBuf::from("data/train.csv"));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("FILE_NOT_FOUND"));
        assert!(json.contains("train.csv"));
    }

    #[test]
    fn test_with_context_preserves_code_and_kind() {
        let error = EdaError::InvalidCsv("unterminated quote".to_string())
            .with_context("While loading upload");
        assert!(error.to_string().contains("While loading upload"));
        assert_eq!(error.error_code(), "INVALID_CSV");
        assert!(error.is_user_error());
    }
}
