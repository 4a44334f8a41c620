//! Quality scoring endpoints.
//!
//! `/quality` scores a dataset described by its aggregate shape;
//! `/quality-from-csv` loads an uploaded CSV and scores the real summary.
//! CSV work runs on the blocking thread pool.

use crate::AppState;
use crate::error::ApiError;
use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use eda_processing::{
    DatasetShape, EdaResult, QualityAssessment, QualityFlags, load_csv_from_bytes, missing_table,
    summarize_dataset,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Multipart field carrying the CSV upload.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRequest {
    pub n_rows: usize,
    pub n_cols: usize,
    pub max_missing_share: f64,
    pub numeric_cols: usize,
    pub categorical_cols: usize,
}

impl QualityRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if !(0.0..=1.0).contains(&self.max_missing_share) {
            return Err(ApiError::BadRequest(format!(
                "max_missing_share must be between 0 and 1, got {}",
                self.max_missing_share
            )));
        }
        let typed_cols = self
            .numeric_cols
            .checked_add(self.categorical_cols)
            .ok_or_else(|| {
                ApiError::BadRequest(
                    "numeric_cols + categorical_cols does not fit a column count".to_string(),
                )
            })?;
        if typed_cols > self.n_cols {
            return Err(ApiError::BadRequest(format!(
                "numeric_cols + categorical_cols ({}) exceeds n_cols ({})",
                typed_cols, self.n_cols
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetShapeResponse {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResponse {
    pub ok_for_model: bool,
    pub quality_score: f64,
    pub message: String,
    pub latency_ms: f64,
    pub flags: QualityFlags,
    pub dataset_shape: DatasetShapeResponse,
}

impl QualityResponse {
    fn new(assessment: QualityAssessment, rows: usize, cols: usize, started: Instant) -> Self {
        Self {
            ok_for_model: assessment.ok_for_model,
            quality_score: assessment.quality_score,
            message: assessment.message,
            latency_ms: started.elapsed().as_secs_f64() * 1000.0,
            flags: assessment.flags,
            dataset_shape: DatasetShapeResponse { rows, cols },
        }
    }
}

pub async fn quality(
    State(state): State<AppState>,
    payload: Result<Json<QualityRequest>, JsonRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
    let started = Instant::now();
    let Json(request) = payload?;
    request.validate()?;

    let assessment = state.scorer.assess_shape(&DatasetShape {
        n_rows: request.n_rows,
        n_cols: request.n_cols,
        max_missing_share: request.max_missing_share,
    })?;

    debug!(
        "Scored shape {}x{}: {:.3}",
        request.n_rows, request.n_cols, assessment.quality_score
    );
    Ok(Json(QualityResponse::new(
        assessment,
        request.n_rows,
        request.n_cols,
        started,
    )))
}

pub async fn quality_from_csv(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<QualityResponse>, ApiError> {
    let started = Instant::now();
    let bytes = read_file_field(multipart?).await?;
    info!("Received CSV upload ({} bytes)", bytes.len());

    let scorer = state.scorer.clone();
    let load_options = state.load_options.clone();
    let scored = tokio::task::spawn_blocking(move || -> EdaResult<_> {
        let df = load_csv_from_bytes(&bytes, &load_options)?;
        let summary = summarize_dataset(&df)?;
        let missing = missing_table(&df)?;
        Ok((scorer.assess(&summary, &missing), summary.n_rows, summary.n_cols))
    })
    .await
    .map_err(|err| ApiError::Internal(format!("CSV task failed: {err}")))?;

    let (assessment, rows, cols) = scored?;
    if rows == 0 {
        return Err(ApiError::BadRequest(
            "Uploaded CSV has no data rows".to_string(),
        ));
    }

    Ok(Json(QualityResponse::new(assessment, rows, cols, started)))
}

async fn read_file_field(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
