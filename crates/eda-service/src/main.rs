//! Entry point for the EDA HTTP service.

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use eda_service::{AppState, ServiceConfig, router};
use tokio::net::TcpListener;
use tracing::info;

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads EDA_* variables
    dotenv().ok();
    let config = ServiceConfig::parse();
    init_logging(&config.log_level);

    let state = AppState::new(config.thresholds()?, config.load_options()?)
        .with_max_upload_bytes(config.max_upload_bytes());
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("eda-service listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("eda-service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
