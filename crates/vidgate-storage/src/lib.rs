//! Vidgate Storage Library
//!
//! Object store abstraction for uploaded videos. The [`Storage`] trait streams
//! content into a single bucket; backends are Cloudflare R2 (any S3-compatible
//! endpoint) and an in-process store for development and tests.
//!
//! # Object names
//!
//! Objects are stored at the bucket root under the name chosen by the caller,
//! e.g. `3f0c9a4e-...-1b2c.mp4`. Backends never rewrite or prefix names.

pub mod factory;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub(crate) mod payload;
#[cfg(feature = "storage-r2")]
pub mod r2;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-r2")]
pub use r2::{normalize_endpoint, R2Storage};
pub use traits::{BoxError, ByteStream, Storage, StorageError, StorageResult, DEFAULT_CONTENT_TYPE};
pub use vidgate_core::StorageBackend;
