//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; every failure renders as
//! `{"error": <client message>, "code": <machine code>}` with the status
//! carried by [`ErrorMetadata`]. Internal messages only reach the logs.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use vidgate_core::{AppError, ErrorMetadata, LogLevel};
use vidgate_storage::StorageError;

/// Message for uploads cut off by the body limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "file exceeds the maximum upload size";
/// Message for bodies that failed mid-stream for any other reason.
pub const BODY_READ_FAILED_MESSAGE: &str = "failed to read uploaded file";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rule: IntoResponse and AppError are both foreign to this crate)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Error occurred"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::StoreWrite(msg),
            StorageError::ContentRead(source) => {
                let too_large = source
                    .downcast_ref::<MultipartError>()
                    .is_some_and(|e| e.status() == StatusCode::PAYLOAD_TOO_LARGE);
                if too_large {
                    AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
                } else {
                    tracing::debug!(error = %source, "Upload body could not be read");
                    AppError::BadRequest(BODY_READ_FAILED_MESSAGE.to_string())
                }
            }
            StorageError::PresignFailed(msg) => AppError::StoreRead(msg),
            StorageError::NotFound(msg) => AppError::StoreRead(format!("not found: {}", msg)),
            StorageError::BackendError(msg) => AppError::StoreRead(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = HttpAppError(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn test_error_body_has_only_error_and_code() {
        let (status, body) = render(AppError::BadRequest("no file uploaded".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "no file uploaded", "code": "BAD_REQUEST"})
        );
    }

    #[tokio::test]
    async fn test_server_errors_hide_internal_message() {
        let cases = vec![
            AppError::StoreWrite("secret-endpoint refused".to_string()),
            AppError::StoreRead("secret-endpoint refused".to_string()),
            AppError::MetadataWrite {
                object_name: "a.mp4".to_string(),
                message: "secret-endpoint refused".to_string(),
            },
            AppError::Internal("secret-endpoint refused".to_string()),
        ];
        for err in cases {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            let object = body.as_object().expect("object");
            assert_eq!(object.len(), 2);
            assert!(!body.to_string().contains("secret-endpoint"));
        }
    }

    #[tokio::test]
    async fn test_payload_too_large_status() {
        let (status, body) =
            render(AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn test_from_storage_error_upload_failed() {
        let HttpAppError(app_err) = StorageError::UploadFailed("timeout".to_string()).into();
        match app_err {
            AppError::StoreWrite(msg) => assert_eq!(msg, "timeout"),
            other => panic!("Expected StoreWrite variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_storage_error_content_read() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let HttpAppError(app_err) = StorageError::ContentRead(Box::new(io)).into();
        match app_err {
            AppError::BadRequest(msg) => assert_eq!(msg, BODY_READ_FAILED_MESSAGE),
            other => panic!("Expected BadRequest variant, got {:?}", other),
        }
    }

    #[test]
    fn test_from_storage_error_presign_failed() {
        let HttpAppError(app_err) = StorageError::PresignFailed("no signer".to_string()).into();
        assert!(matches!(app_err, AppError::StoreRead(_)));
    }

    #[test]
    fn test_from_storage_error_config() {
        let HttpAppError(app_err) = StorageError::ConfigError("bad endpoint".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
