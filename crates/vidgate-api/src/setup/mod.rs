//! Application setup and initialization
//!
//! Everything that runs once before the server accepts connections.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::{AppState, UploadSettings};
use anyhow::{Context, Result};
use std::sync::Arc;
use vidgate_core::Config;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.base.environment,
        storage_backend = %config.storage_backend,
        "Configuration loaded and validated successfully"
    );

    let videos = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config)?;

    let state = Arc::new(AppState {
        storage,
        videos,
        upload: UploadSettings {
            public_url: config.public_url().map(String::from),
        },
    });

    let router = routes::setup_routes(&config.base, state.clone())?;

    Ok((state, router))
}
