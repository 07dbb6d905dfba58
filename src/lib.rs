//! Fourcut Album Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod access;
pub mod album;
pub mod config;
pub mod db;
pub mod error;
pub mod image_store;
pub mod picture;
pub mod server;
pub mod sqlite_persistence;
pub mod tag;

// Re-export commonly used types for convenience
pub use access::AlbumRole;
pub use album::{AlbumManager, AlbumStore, SqliteAlbumStore};
pub use db::{open_database, open_in_memory, SharedConnection};
pub use error::{ServiceError, ServiceResult};
pub use image_store::{DiskImageStore, ImageRef, ImageStore, NoOpImageStore};
pub use picture::{PictureManager, PictureStore, SqlitePictureStore};
pub use server::run_server;
pub use tag::{SqliteTagIndex, TagIndex};
