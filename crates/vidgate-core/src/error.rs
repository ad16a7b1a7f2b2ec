//! Error types module
//!
//! All failures of the upload pipeline are unified under [`AppError`]. Each
//! variant describes how it is presented to HTTP clients through
//! [`ErrorMetadata`]; internal messages and source chains only go to logs.
//!
//! The `Database` variant wraps `sqlx::Error` when the `sqlx` feature is on.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as invalid client input
    Debug,
    /// Client-caused but noteworthy, e.g. oversized bodies
    Warn,
    /// Unexpected failures of a dependency
    Error,
}

/// Metadata for error responses: how an error should be presented.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_WRITE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message; never contains internal details
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Object store write failed (StoreWriteError)
    #[error("Object store write failed: {0}")]
    StoreWrite(String),

    /// Object store read or signing failed (StoreReadError)
    #[error("Object store read failed: {0}")]
    StoreRead(String),

    /// The object was written but its metadata row was not (MetadataWriteError)
    #[error("Metadata write failed for object {object_name}: {message}")]
    MetadataWrite {
        object_name: String,
        message: String,
    },

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

/// Static metadata per variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::BadRequest(_) => (400, "BAD_REQUEST", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Warn),
        AppError::StoreWrite(_) => (500, "STORE_WRITE_ERROR", LogLevel::Error),
        AppError::StoreRead(_) => (500, "STORE_READ_ERROR", LogLevel::Error),
        AppError::MetadataWrite { .. } => (500, "METADATA_WRITE_ERROR", LogLevel::Error),
        AppError::Database(_) => (500, "DATABASE_ERROR", LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BadRequest",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::StoreWrite(_) => "StoreWrite",
            AppError::StoreRead(_) => "StoreRead",
            AppError::MetadataWrite { .. } => "MetadataWrite",
            AppError::Database(_) => "Database",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::StoreWrite(_) => "failed to upload file to R2".to_string(),
            AppError::StoreRead(_) => "failed to access stored file".to_string(),
            AppError::MetadataWrite { .. } => {
                "file uploaded but failed to save metadata".to_string()
            }
            AppError::Database(_) => "failed to access database".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }
}
