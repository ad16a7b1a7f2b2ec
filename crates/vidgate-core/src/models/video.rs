use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted upload, one row of the `videos` table.
///
/// `id` and `created_at` are always assigned by the database at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    /// Object key written to the bucket
    pub filename: String,
    /// Client-supplied filename, stored verbatim
    pub original_name: String,
    pub size: i64,
    pub bucket: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a [`VideoRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    pub bucket: String,
    pub url: String,
}

impl NewVideo {
    /// Complete the record with the store-generated fields.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> VideoRecord {
        VideoRecord {
            id,
            filename: self.filename,
            original_name: self.original_name,
            size: self.size,
            bucket: self.bucket,
            url: self.url,
            created_at,
        }
    }
}

/// Outcome of a single object write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub filename: String,
    pub size: u64,
    pub bucket: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}
