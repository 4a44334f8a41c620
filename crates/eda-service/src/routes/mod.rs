mod health;
mod quality;

pub use health::{HealthResponse, SERVICE_NAME, health};
pub use quality::{
    DatasetShapeResponse, FILE_FIELD, QualityRequest, QualityResponse, quality, quality_from_csv,
};
