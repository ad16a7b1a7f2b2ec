use async_trait::async_trait;
use sqlx::PgPool;
use vidgate_core::{AppError, NewVideo, VideoRecord};

/// DDL for the metadata table; safe to run repeatedly.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS videos (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    filename TEXT NOT NULL,
    original_name TEXT NOT NULL,
    size BIGINT NOT NULL CHECK (size >= 0),
    bucket TEXT NOT NULL,
    url TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Metadata persistence used by the upload handler
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Create the `videos` table if it does not exist. Existing rows are untouched.
    async fn init_schema(&self) -> Result<(), AppError>;

    /// Insert one row; `id` and `created_at` are assigned by the database.
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError>;
}

/// Repository for video metadata rows
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        tracing::info!("Database schema ensured");
        Ok(())
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", filename = %video.filename))]
    async fn insert(&self, video: NewVideo) -> Result<VideoRecord, AppError> {
        let record = sqlx::query_as::<_, VideoRecord>(
            r#"
            INSERT INTO videos (filename, original_name, size, bucket, url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, filename, original_name, size, bucket, url, created_at
            "#,
        )
        .bind(&video.filename)
        .bind(&video.original_name)
        .bind(video.size)
        .bind(&video.bucket)
        .bind(&video.url)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %record.id, "Video metadata inserted");

        Ok(record)
    }
}
