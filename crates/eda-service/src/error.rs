//! HTTP error responses.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eda_processing::EdaError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure inside the analysis library.
    #[error(transparent)]
    Eda(#[from] EdaError),

    /// The request itself is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The upload exceeds the configured body limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The JSON body could not be parsed into the expected shape.
    #[error("{0}")]
    Validation(String),

    /// Anything else that is not the caller's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Eda(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            Self::Eda(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Eda(err) => err.error_code(),
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge(rejection.body_text());
        }
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge(format!("Upload rejected: {}", err.body_text()));
        }
        Self::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Rejected request: {}", self);
        }

        let body = ErrorBody {
            detail: self.to_string(),
            code: self.code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(EdaError::InvalidCsv("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(EdaError::ReportGenerationFailed("disk".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Validation("missing field".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let too_large = ApiError::PayloadTooLarge("upload".into());
        assert_eq!(too_large.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(too_large.code(), "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn test_code_comes_from_library_error() {
        let err = ApiError::from(EdaError::EmptyDataset.with_context("upload"));
        assert_eq!(err.code(), "EMPTY_DATASET");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
