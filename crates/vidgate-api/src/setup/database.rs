//! Database setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use vidgate_core::Config;
use vidgate_db::{connect, VideoRepository, VideoStore};

/// Open the pool and make sure the `videos` table exists
pub async fn setup_database(config: &Config) -> Result<Arc<dyn VideoStore>> {
    let pool = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let repository = VideoRepository::new(pool);
    repository
        .init_schema()
        .await
        .context("Failed to create database schema")?;

    Ok(Arc::new(repository))
}
