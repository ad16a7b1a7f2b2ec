use crate::error::{HttpAppError, PAYLOAD_TOO_LARGE_MESSAGE};
use crate::state::AppState;
use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use vidgate_core::naming::{build_object_url, generate_object_name};
use vidgate_core::{AppError, NewVideo, VideoRecord};
use vidgate_storage::{BoxError, ByteStream};

pub const NO_FILE_MESSAGE: &str = "no file uploaded";
pub const NOT_VIDEO_MESSAGE: &str = "only video files are allowed";
pub const SUCCESS_MESSAGE: &str = "file uploaded successfully";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub video: VideoRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}

/// Accept one multipart `file` field, stream it to the object store, then
/// record its metadata row.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let start = Instant::now();

    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Request is not a multipart form");
        AppError::BadRequest(NO_FILE_MESSAGE.to_string())
    })?;
    // First `file` field that carries a filename wins; other fields are skipped.
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if is_file_field(&field) => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return Err(AppError::BadRequest(NO_FILE_MESSAGE.to_string()).into()),
            Err(e) => return Err(multipart_error(e).into()),
        }
    };

    let original_name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);

    if !is_video_content_type(content_type.as_deref()) {
        return Err(AppError::BadRequest(NOT_VIDEO_MESSAGE.to_string()).into());
    }

    let object_name = generate_object_name(&original_name);
    tracing::info!(
        object_name = %object_name,
        original_name = %original_name,
        content_type = content_type.as_deref().unwrap_or_default(),
        "Processing upload"
    );

    let content: ByteStream<'_> = Box::pin(field.map_err(|e| Box::new(e) as BoxError));
    let uploaded = state
        .storage
        .put(&object_name, content, None, content_type.as_deref())
        .await?;

    let size = i64::try_from(uploaded.size).map_err(|_| {
        AppError::Internal(format!("upload size {} does not fit in i64", uploaded.size))
    })?;
    let url = build_object_url(
        state.upload.public_url.as_deref(),
        &uploaded.bucket,
        &object_name,
    );

    let new_video = NewVideo {
        filename: object_name.clone(),
        original_name,
        size,
        bucket: uploaded.bucket.clone(),
        url,
    };

    let video = state.videos.insert(new_video).await.map_err(|e| {
        tracing::error!(
            error = %e.detailed_message(),
            bucket = %uploaded.bucket,
            key = %object_name,
            "Object stored but metadata insert failed; object is orphaned"
        );
        AppError::MetadataWrite {
            object_name: object_name.clone(),
            message: e.to_string(),
        }
    })?;

    tracing::info!(
        id = %video.id,
        key = %video.filename,
        size_bytes = video.size,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Upload completed"
    );

    Ok(Json(UploadResponse {
        message: SUCCESS_MESSAGE,
        video,
        etag: uploaded.etag,
    }))
}

fn is_file_field(field: &Field<'_>) -> bool {
    field.name() == Some("file") && field.file_name().is_some()
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
    } else {
        tracing::debug!(error = %err, "Malformed multipart body");
        AppError::BadRequest(NO_FILE_MESSAGE.to_string())
    }
}

/// `video/*` check on the declared type; parameters are ignored.
fn is_video_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase().starts_with("video/"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn video_types_are_accepted() {
        assert!(is_video_content_type(Some("video/mp4")));
        assert!(is_video_content_type(Some("video/quicktime")));
        assert!(is_video_content_type(Some("Video/MP4; codecs=avc1")));
    }

    #[test]
    fn non_video_types_are_rejected() {
        assert!(!is_video_content_type(Some("image/png")));
        assert!(!is_video_content_type(Some("application/octet-stream")));
        assert!(!is_video_content_type(Some("")));
        assert!(!is_video_content_type(Some("videos/mp4")));
        assert!(!is_video_content_type(None));
    }

    #[test]
    fn response_flattens_record_and_omits_missing_etag() {
        let response = UploadResponse {
            message: SUCCESS_MESSAGE,
            video: VideoRecord {
                id: Uuid::nil(),
                filename: "a.mp4".to_string(),
                original_name: "clip.mp4".to_string(),
                size: 3,
                bucket: "videos".to_string(),
                url: "https://videos.r2.cloudflarestorage.com/a.mp4".to_string(),
                created_at: Utc::now(),
            },
            etag: None,
        };
        let value = serde_json::to_value(&response).expect("json");
        assert_eq!(value["message"], SUCCESS_MESSAGE);
        assert_eq!(value["filename"], "a.mp4");
        assert_eq!(value["size"], 3);
        assert!(value.get("etag").is_none());
        assert!(value.get("video").is_none());
    }
}
