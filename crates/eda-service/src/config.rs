//! Service configuration from flags, environment and `.env`.

use clap::Parser;
use eda_processing::{LoadOptions, QualityThresholds};

pub const DEFAULT_MAX_UPLOAD_MB: usize = 100;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "eda-service",
    version,
    about = "HTTP service exposing dataset quality scoring"
)]
pub struct ServiceConfig {
    /// Address to bind
    #[arg(long, env = "EDA_SERVICE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EDA_SERVICE_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Separator of uploaded CSV files
    #[arg(long, env = "EDA_CSV_SEP", default_value = ",")]
    pub sep: String,

    /// Encoding of uploaded CSV files
    #[arg(long, env = "EDA_CSV_ENCODING", default_value = "utf-8")]
    pub encoding: String,

    /// Datasets with fewer rows are flagged as too small
    #[arg(long, env = "EDA_MIN_ROWS", default_value_t = 100)]
    pub min_rows: usize,

    /// Columns missing more than this share are flagged (0.0 - 1.0)
    #[arg(long, env = "EDA_MAX_MISSING_SHARE", default_value_t = 0.5)]
    pub max_missing_share: f64,

    /// Largest accepted CSV upload, in megabytes
    #[arg(long, env = "EDA_MAX_UPLOAD_MB", default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_upload_mb: usize,
}

impl ServiceConfig {
    /// `host:port`, resolved when binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn load_options(&self) -> eda_processing::EdaResult<LoadOptions> {
        LoadOptions::from_cli(&self.sep, &self.encoding)
    }

    pub fn thresholds(&self) -> eda_processing::EdaResult<QualityThresholds> {
        let thresholds = QualityThresholds::builder()
            .min_rows(self.min_rows)
            .max_missing_share(self.max_missing_share)
            .build()?;
        Ok(thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::parse_from(["eda-service"]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.load_options().unwrap(), LoadOptions::default());
        assert_eq!(config.thresholds().unwrap(), QualityThresholds::default());
        assert_eq!(config.max_upload_bytes(), 100 * 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::parse_from([
            "eda-service",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--sep",
            ";",
            "--min-rows",
            "10",
            "--max-upload-mb",
            "5",
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.load_options().unwrap().separator, b';');
        assert_eq!(config.thresholds().unwrap().min_rows, 10);
        assert_eq!(config.max_upload_bytes(), 5 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_share_rejected() {
        let config = ServiceConfig::parse_from(["eda-service", "--max-missing-share", "2"]);
        assert!(config.thresholds().is_err());
    }
}
