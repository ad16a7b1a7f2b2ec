//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vidgate-api`. Storage is the
//! in-memory backend; the metadata store is an in-process fake, so no
//! external services are needed.

pub mod fakes;

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use bytes::Bytes;
use std::sync::Arc;
use vidgate_api::setup::routes;
use vidgate_api::state::{AppState, UploadSettings};
use vidgate_core::BaseConfig;
use vidgate_db::VideoStore;
use vidgate_storage::{MemoryStorage, Storage};

pub use fakes::{FailingStorage, FailingVideoStore, RecordingVideoStore};

pub const TEST_BUCKET: &str = "videos";

/// Test application: server plus handles on the stores behind it.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub videos: Arc<RecordingVideoStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub async fn stored_objects(&self) -> Vec<String> {
        self.storage.object_names().await.expect("list objects")
    }
}

pub struct TestAppBuilder {
    storage: Option<Arc<dyn Storage>>,
    videos: Option<Arc<dyn VideoStore>>,
    public_url: Option<String>,
    max_upload_bytes: usize,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            videos: None,
            public_url: None,
            max_upload_bytes: vidgate_core::MAX_UPLOAD_BYTES,
        }
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn videos(mut self, videos: Arc<dyn VideoStore>) -> Self {
        self.videos = Some(videos);
        self
    }

    pub fn public_url(mut self, public_url: &str) -> Self {
        self.public_url = Some(public_url.to_string());
        self
    }

    pub fn max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    /// Build the app; stores not overridden are the in-memory defaults.
    pub fn build(self) -> TestApp {
        let TestRouter {
            router,
            storage,
            videos,
        } = self.into_router();
        let server =
            TestServer::new(router.into_make_service()).expect("Failed to create test server");

        TestApp {
            server,
            storage,
            videos,
        }
    }

    /// Bare router, for requests that must be built by hand.
    pub fn into_router(self) -> TestRouter {
        let memory = MemoryStorage::new(TEST_BUCKET);
        let recording = Arc::new(RecordingVideoStore::default());

        let state = Arc::new(AppState {
            storage: self
                .storage
                .unwrap_or_else(|| Arc::new(memory.clone()) as Arc<dyn Storage>),
            videos: self
                .videos
                .unwrap_or_else(|| recording.clone() as Arc<dyn VideoStore>),
            upload: UploadSettings {
                public_url: self.public_url,
            },
        });

        let config = BaseConfig {
            server_port: 0,
            environment: "test".to_string(),
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: 64,
            max_upload_bytes: self.max_upload_bytes,
        };

        let router = routes::setup_routes(&config, state).expect("Failed to setup routes");

        TestRouter {
            router,
            storage: memory,
            videos: recording,
        }
    }
}

/// Router plus handles on the stores behind it.
pub struct TestRouter {
    pub router: Router,
    pub storage: MemoryStorage,
    pub videos: Arc<RecordingVideoStore>,
}

/// App backed by in-memory storage and a recording metadata store.
pub fn setup_test_app() -> TestApp {
    TestAppBuilder::new().build()
}

/// Multipart form with a single `file` part.
pub fn file_form(file_name: &str, mime_type: &str, content: &'static [u8]) -> MultipartForm {
    MultipartForm::new().add_part("file", file_part(file_name, mime_type, content))
}

pub fn file_part(file_name: &str, mime_type: &str, content: &'static [u8]) -> Part {
    Part::bytes(Bytes::from_static(content))
        .file_name(file_name.to_string())
        .mime_type(mime_type.to_string())
}

pub const RAW_BOUNDARY: &str = "vidgate-test-boundary";

/// Encoded multipart body with one `file` part, for hand-built requests.
pub fn raw_file_body(file_name: &str, mime_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\nContent-Type: {m}\r\n\r\n",
        b = RAW_BOUNDARY,
        f = file_name,
        m = mime_type
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", RAW_BOUNDARY).as_bytes());
    body
}
