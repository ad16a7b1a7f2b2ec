//! Vidgate metadata store
//!
//! One row per stored object in the `videos` table. The [`VideoStore`] trait is
//! what the HTTP layer depends on; [`VideoRepository`] is the PostgreSQL
//! implementation.

pub mod db;

pub use db::{connect, VideoRepository, VideoStore, SCHEMA};
