//! vidgate Core Library
//!
//! This crate provides the domain models, error types, configuration, and object
//! naming rules shared by the storage, database, and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::{
    BaseConfig, Config, ConfigError, DatabaseConfig, R2Config, DEFAULT_PORT, MAX_UPLOAD_BYTES,
};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{NewVideo, UploadResult, VideoRecord};
pub use storage_types::StorageBackend;
