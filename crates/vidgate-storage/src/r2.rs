use crate::payload::put_stream;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::ObjectStoreExt;
use std::time::Duration;
use vidgate_core::{R2Config, UploadResult};

/// Cloudflare R2 (or any S3-compatible) storage
///
/// The bucket is assumed to exist; it is never created by this backend.
#[derive(Clone, Debug)]
pub struct R2Storage {
    store: AmazonS3,
    bucket: String,
    endpoint_url: String,
}

/// Strip a leading `http://` / `https://` and trailing slashes from an endpoint.
pub fn normalize_endpoint(endpoint: &str) -> &str {
    let endpoint = endpoint.trim();
    let without_scheme = ["https://", "http://"]
        .iter()
        .find_map(|scheme| {
            endpoint
                .get(..scheme.len())
                .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
                .map(|_| &endpoint[scheme.len()..])
        })
        .unwrap_or(endpoint);
    without_scheme.trim_end_matches('/')
}

impl R2Storage {
    /// Create a new R2Storage instance
    ///
    /// Fails with `ConfigError` when the endpoint, credentials, or bucket are
    /// empty, or when the S3 client rejects the settings.
    pub fn new(config: &R2Config) -> StorageResult<Self> {
        let host = normalize_endpoint(&config.endpoint);
        let required = [
            ("endpoint", host),
            ("access key", config.access_key_id.as_str()),
            ("secret key", config.secret_access_key.as_str()),
            ("bucket", config.bucket.as_str()),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(StorageError::ConfigError(format!("R2 {} is not configured", name)));
        }

        let scheme = if config.use_ssl { "https" } else { "http" };
        let endpoint_url = format!("{}://{}", scheme, host);

        let store = AmazonS3Builder::new()
            .with_endpoint(endpoint_url.clone())
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone())
            .with_access_key_id(config.access_key_id.clone())
            .with_secret_access_key(config.secret_access_key.clone())
            .with_allow_http(!config.use_ssl)
            .with_virtual_hosted_style_request(false)
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::info!(
            endpoint = %endpoint_url,
            bucket = %config.bucket,
            region = %config.region,
            "R2 storage client initialized"
        );

        Ok(R2Storage {
            store,
            bucket: config.bucket.clone(),
            endpoint_url,
        })
    }

    /// Endpoint URL the client talks to, scheme included
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl Storage for R2Storage {
    async fn put<'a>(
        &self,
        object_name: &str,
        content: ByteStream<'a>,
        size_hint: Option<u64>,
        content_type: Option<&str>,
    ) -> StorageResult<UploadResult> {
        put_stream(
            &self.store,
            &self.bucket,
            object_name,
            content,
            size_hint,
            content_type,
        )
        .await
    }

    async fn presigned_get(&self, object_name: &str, ttl: Duration) -> StorageResult<String> {
        let location = Path::from(object_name);
        let url = self
            .store
            .signed_url(Method::GET, &location, ttl)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, key = %object_name, "Failed to presign object URL");
                StorageError::PresignFailed(e.to_string())
            })?;

        Ok(url.to_string())
    }

    async fn exists(&self, object_name: &str) -> StorageResult<bool> {
        let location = Path::from(object_name);
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::R2
    }
}
