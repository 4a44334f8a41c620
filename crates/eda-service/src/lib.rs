//! HTTP front end for the EDA toolkit.
//!
//! Endpoints:
//!
//! - `GET /health`: liveness probe
//! - `POST /quality`: score a dataset from its aggregate shape (JSON body)
//! - `POST /quality-from-csv`: score an uploaded CSV (multipart field `file`)
//!
//! ```rust,ignore
//! let app = eda_service::router(AppState::default());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use eda_processing::{LoadOptions, QualityScorer, QualityThresholds};

pub use config::{DEFAULT_MAX_UPLOAD_MB, ServiceConfig};
pub use error::{ApiError, ErrorBody};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub scorer: QualityScorer,
    pub load_options: LoadOptions,
    /// Body limit for `/quality-from-csv`, in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(thresholds: QualityThresholds, load_options: LoadOptions) -> Self {
        Self {
            scorer: QualityScorer::new(thresholds),
            load_options,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(QualityThresholds::default(), LoadOptions::default())
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    Router::new()
        .route("/health", get(routes::health))
        .route("/quality", post(routes::quality))
        .route(
            "/quality-from-csv",
            post(routes::quality_from_csv).layer(upload_limit),
        )
        .with_state(state)
}
