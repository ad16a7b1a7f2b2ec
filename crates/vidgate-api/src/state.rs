//! Application state shared by all handlers.

use std::sync::Arc;
use vidgate_db::VideoStore;
use vidgate_storage::Storage;

/// Settings the upload handler needs beyond its two stores.
#[derive(Clone, Debug, Default)]
pub struct UploadSettings {
    /// Base for public object URLs; `None` falls back to the R2 bucket host
    pub public_url: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub videos: Arc<dyn VideoStore>,
    pub upload: UploadSettings,
}
