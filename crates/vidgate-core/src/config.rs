//! Configuration module
//!
//! Configuration is read once at startup from the process environment (after
//! loading an optional `.env` file). Missing mandatory values are fatal.

use std::env;

use crate::storage_types::StorageBackend;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 5000;
/// Maximum accepted request body (100 MiB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const DEFAULT_R2_REGION: &str = "auto";

/// Startup configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    pub max_upload_bytes: usize,
}

/// Metadata database settings
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_seconds: u64,
}

/// Object store (R2 / S3-compatible) settings
#[derive(Clone, Debug)]
pub struct R2Config {
    /// Endpoint as configured; the scheme, if any, is stripped by the storage backend
    pub endpoint: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub region: String,
    pub use_ssl: bool,
    /// Base for public object URLs, e.g. `https://cdn.example.com`
    pub public_url: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub database: DatabaseConfig,
    pub storage_backend: StorageBackend,
    pub r2: R2Config,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match var("PORT") {
            Some(port) => port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("'{}' is not a valid port number", port),
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port,
            environment,
            cors_origins,
            http_concurrency_limit: var("HTTP_CONCURRENCY_LIMIT")
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        };

        let database = DatabaseConfig {
            url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            max_connections: var("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_CONNECTIONS),
            timeout_seconds: var("DB_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
        };

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => s
                .parse::<StorageBackend>()
                .map_err(|reason| ConfigError::Invalid {
                    var: "STORAGE_BACKEND",
                    reason,
                })?,
            None => StorageBackend::R2,
        };

        // Credentials are only needed when talking to a real endpoint.
        let credential = |key: &'static str| -> Result<String, ConfigError> {
            match storage_backend {
                StorageBackend::R2 => var(key).ok_or(ConfigError::Missing(key)),
                StorageBackend::Memory => Ok(var(key).unwrap_or_default()),
            }
        };

        let r2 = R2Config {
            endpoint: credential("R2_ENDPOINT")?,
            access_key_id: credential("R2_ACCESS_KEY_ID")?,
            secret_access_key: credential("R2_SECRET_ACCESS_KEY")?,
            bucket: var("R2_BUCKET_NAME").ok_or(ConfigError::Missing("R2_BUCKET_NAME"))?,
            region: var("R2_REGION").unwrap_or_else(|| DEFAULT_R2_REGION.to_string()),
            use_ssl: match var("R2_USE_SSL") {
                Some(s) => parse_bool(&s).ok_or_else(|| ConfigError::Invalid {
                    var: "R2_USE_SSL",
                    reason: format!("'{}' is not a boolean", s),
                })?,
                None => true,
            },
            public_url: var("R2_PUBLIC_URL").map(|s| s.trim().to_string()),
        };

        let config = Config {
            base,
            database,
            storage_backend,
            r2,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.database.url;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: "must be a PostgreSQL connection string".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be greater than 0".to_string(),
            });
        }

        if let Some(public_url) = &self.r2.public_url {
            if !(public_url.starts_with("http://") || public_url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: "R2_PUBLIC_URL",
                    reason: "must start with http:// or https://".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn public_url(&self) -> Option<&str> {
        self.r2.public_url.as_deref()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
