//! Configuration validation
//!
//! Startup checks on top of what `Config` itself enforces.

use anyhow::Result;
use vidgate_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.database.timeout_seconds == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    if config.base.cors_origins.is_empty() {
        return Err(anyhow::anyhow!(
            "CORS_ORIGINS must list at least one origin or '*'"
        ));
    }

    if config.is_production() && config.base.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows all origins in production");
    }

    if config.is_production() && !config.r2.use_ssl {
        tracing::warn!("R2_USE_SSL is disabled in production; object traffic is unencrypted");
    }

    Ok(())
}
