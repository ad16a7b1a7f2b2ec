//! In-process stand-ins for the object store and the metadata store.

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;
use vidgate_core::{AppError, NewVideo, UploadResult, VideoRecord};
use vidgate_db::VideoStore;
use vidgate_storage::{ByteStream, Storage, StorageBackend, StorageError, StorageResult};

/// Keeps inserted rows in memory.
#[derive(Default)]
pub struct RecordingVideoStore {
    rows: Mutex<Vec<VideoRecord>>,
}

impl RecordingVideoStore {
    pub fn rows(&self) -> Vec<VideoRecord> {
        self.rows.lock().expect("rows lock").clone()
    }
}

#[async_trait]
impl VideoStore for RecordingVideoStore {
    async fn init_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        let record = video.into_record(Uuid::new_v4(), Utc::now());
        self.rows.lock().expect("rows lock").push(record.clone());
        Ok(record)
    }
}

/// Every insert fails as if the database were unreachable.
#[derive(Default)]
pub struct FailingVideoStore {
    attempts: AtomicUsize,
}

impl FailingVideoStore {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VideoStore for FailingVideoStore {
    async fn init_schema(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, _video: NewVideo) -> Result<VideoRecord, AppError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Internal(
            "connection refused (db.internal:5432)".to_string(),
        ))
    }
}

/// Every put fails after draining the content, like an endpoint rejecting the PUT.
#[derive(Default)]
pub struct FailingStorage {
    puts: AtomicUsize,
}

impl FailingStorage {
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put<'a>(
        &self,
        _object_name: &str,
        mut content: ByteStream<'a>,
        _size_hint: Option<u64>,
        _content_type: Option<&str>,
    ) -> StorageResult<UploadResult> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        while let Some(chunk) = content.next().await {
            chunk.map_err(StorageError::ContentRead)?;
        }
        Err(StorageError::UploadFailed(
            "dns error: r2.internal.example".to_string(),
        ))
    }

    async fn presigned_get(&self, object_name: &str, _ttl: Duration) -> StorageResult<String> {
        Err(StorageError::PresignFailed(object_name.to_string()))
    }

    async fn exists(&self, _object_name: &str) -> StorageResult<bool> {
        Ok(false)
    }

    fn bucket(&self) -> &str {
        super::TEST_BUCKET
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::R2
    }
}
