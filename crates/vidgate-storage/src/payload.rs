//! Shared write path for `object_store` backed storages.

use crate::traits::{effective_content_type, ByteStream, StorageError, StorageResult};
use futures::StreamExt;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayloadMut};
use std::time::Instant;
use vidgate_core::UploadResult;

/// Drain `content` into a single payload and write it with one PUT.
///
/// Chunks are kept as `Bytes` and never copied while the stream is drained.
pub(crate) async fn put_stream<S: ObjectStore>(
    store: &S,
    bucket: &str,
    object_name: &str,
    mut content: ByteStream<'_>,
    size_hint: Option<u64>,
    content_type: Option<&str>,
) -> StorageResult<UploadResult> {
    let start = Instant::now();
    let content_type = effective_content_type(content_type);

    let mut payload = PutPayloadMut::new();
    while let Some(chunk) = content.next().await {
        payload.push(chunk.map_err(StorageError::ContentRead)?);
    }
    let size = payload.content_length() as u64;

    if let Some(expected) = size_hint.filter(|expected| *expected != size) {
        tracing::warn!(
            key = %object_name,
            expected_bytes = expected,
            received_bytes = size,
            "Upload size differs from declared size"
        );
    }

    let mut attributes = Attributes::new();
    attributes.insert(Attribute::ContentType, content_type.to_string().into());
    let opts = PutOptions {
        attributes,
        ..Default::default()
    };

    let location = Path::from(object_name);
    let result = store
        .put_opts(&location, payload.freeze(), opts)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %bucket,
                key = %object_name,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

    tracing::info!(
        bucket = %bucket,
        key = %object_name,
        size_bytes = size,
        content_type = %content_type,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Object upload successful"
    );

    Ok(UploadResult {
        filename: object_name.to_string(),
        size,
        bucket: bucket.to_string(),
        etag: result.e_tag,
    })
}
