//! Vidgate API Library
//!
//! HTTP surface of the upload gateway: `GET /` and `POST /upload`, plus the
//! startup code that wires configuration, storage and the metadata store.

mod telemetry;

pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, UploadSettings};
