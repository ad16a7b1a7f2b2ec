use axum::Json;
use serde_json::{json, Value};

/// Service banner listing the available endpoints.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "File Upload API - Cloudflare R2",
        "endpoints": {
            "POST /upload": "Upload a video file to R2"
        }
    }))
}
