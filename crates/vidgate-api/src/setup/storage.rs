//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidgate_core::Config;
use vidgate_storage::{create_storage, Storage};

/// Build the configured object store backend
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config).context("Failed to initialize storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = %storage.bucket(),
        "Storage initialized successfully"
    );
    Ok(storage)
}
