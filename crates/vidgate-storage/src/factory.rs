#[cfg(feature = "storage-memory")]
use crate::MemoryStorage;
#[cfg(feature = "storage-r2")]
use crate::R2Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use vidgate_core::Config;

/// Create a storage backend based on configuration
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        #[cfg(feature = "storage-r2")]
        StorageBackend::R2 => {
            let storage = R2Storage::new(&config.r2)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-r2"))]
        StorageBackend::R2 => Err(StorageError::ConfigError(
            "R2 storage backend not available (storage-r2 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        StorageBackend::Memory => {
            if config.is_production() {
                return Err(StorageError::ConfigError(
                    "in-memory storage cannot be used in production".to_string(),
                ));
            }
            tracing::warn!("Using in-memory storage; uploaded objects are lost on restart");
            Ok(Arc::new(MemoryStorage::new(config.r2.bucket.clone())))
        }

        #[cfg(not(feature = "storage-memory"))]
        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Memory storage backend not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
