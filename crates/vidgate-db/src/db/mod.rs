//! Database repositories for data access layer
//
// Connection pool setup
pub mod pool;
//
// Video metadata rows
pub mod video;

pub use pool::connect;
pub use video::{VideoRepository, VideoStore, SCHEMA};
