use crate::payload::put_stream;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, Error as ObjectStoreError, ObjectStore, ObjectStoreExt};
use std::sync::Arc;
use std::time::Duration;
use vidgate_core::UploadResult;

/// In-process object store, for local development and tests
///
/// Objects live as long as the storage value (and its clones) do.
#[derive(Clone, Debug)]
pub struct MemoryStorage {
    store: Arc<InMemory>,
    bucket: String,
}

impl MemoryStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        tracing::info!(bucket = %bucket, "In-memory storage initialized");
        MemoryStorage {
            store: Arc::new(InMemory::new()),
            bucket,
        }
    }

    /// Names of every stored object, sorted
    pub async fn object_names(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        names.sort();
        Ok(names)
    }

    /// Full content of one object
    pub async fn read(&self, object_name: &str) -> StorageResult<Bytes> {
        let result = self
            .store
            .get(&Path::from(object_name))
            .await
            .map_err(|e| map_read_error(object_name, e))?;
        result
            .bytes()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))
    }

    /// Content type recorded for one object
    pub async fn content_type(&self, object_name: &str) -> StorageResult<Option<String>> {
        let result = self
            .store
            .get(&Path::from(object_name))
            .await
            .map_err(|e| map_read_error(object_name, e))?;
        Ok(result
            .attributes
            .get(&Attribute::ContentType)
            .map(|value| String::from(&**value)))
    }
}

fn map_read_error(object_name: &str, err: ObjectStoreError) -> StorageError {
    match err {
        ObjectStoreError::NotFound { .. } => StorageError::NotFound(object_name.to_string()),
        e => StorageError::BackendError(e.to_string()),
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put<'a>(
        &self,
        object_name: &str,
        content: ByteStream<'a>,
        size_hint: Option<u64>,
        content_type: Option<&str>,
    ) -> StorageResult<UploadResult> {
        put_stream(
            self.store.as_ref(),
            &self.bucket,
            object_name,
            content,
            size_hint,
            content_type,
        )
        .await
    }

    async fn presigned_get(&self, object_name: &str, _ttl: Duration) -> StorageResult<String> {
        Err(StorageError::PresignFailed(format!(
            "in-memory storage cannot sign URLs for {}",
            object_name
        )))
    }

    async fn exists(&self, object_name: &str) -> StorageResult<bool> {
        match self.store.head(&Path::from(object_name)).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
