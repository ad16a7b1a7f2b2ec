//! Storage abstraction trait
//!
//! This module defines the Storage trait that all object store backends implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;
use vidgate_core::UploadResult;

/// Content type recorded when the client did not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Error type carried by upload content streams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Chunked object content, consumed exactly once by [`Storage::put`].
pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send + 'a>>;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store rejected or failed the write (StoreWriteError)
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Reading the content stream failed before the write was attempted
    #[error("Failed to read upload content: {0}")]
    ContentRead(#[source] BoxError),

    /// A presigned URL could not be produced (StoreReadError)
    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Backends own their connection and credentials and are shared across
/// requests as `Arc<dyn Storage>`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `content` into the bucket under `object_name`.
    ///
    /// `size_hint` is the declared length, if the caller knows it; the returned
    /// size is always the number of bytes actually read from `content`.
    /// `content_type` falls back to [`DEFAULT_CONTENT_TYPE`] when absent or empty.
    /// Creates the object or overwrites an existing one.
    async fn put<'a>(
        &self,
        object_name: &str,
        content: ByteStream<'a>,
        size_hint: Option<u64>,
        content_type: Option<&str>,
    ) -> StorageResult<UploadResult>;

    /// Generate a time-limited URL granting GET access to one object
    async fn presigned_get(&self, object_name: &str, ttl: Duration) -> StorageResult<String>;

    /// Check if an object exists
    async fn exists(&self, object_name: &str) -> StorageResult<bool>;

    /// Bucket every object of this backend lives in
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Resolve the content type to record for an object.
pub(crate) fn effective_content_type(content_type: Option<&str>) -> &str {
    content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
