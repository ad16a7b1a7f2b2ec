//! Domain models

pub mod video;

pub use video::{NewVideo, UploadResult, VideoRecord};
