//! Data quality scoring module.
//!
//! This module derives quality flags (too few rows, excessive missingness,
//! constant or high-cardinality columns) and a single quality score.

mod scorer;

pub use scorer::{
    CONSTANT_COLUMNS_PENALTY, DatasetShape, OK_FOR_MODEL_THRESHOLD, QualityScorer,
    TOO_FEW_ROWS_PENALTY, compute_quality_flags, quality_score,
};
