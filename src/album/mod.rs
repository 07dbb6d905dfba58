mod album_manager;
mod album_store;
mod models;
pub mod schema;
mod sqlite_album_store;

pub use album_manager::AlbumManager;
pub use album_store::AlbumStore;
pub use models::{validate_membership, Album, AlbumId, UserId, DEFAULT_SLOT_COUNT};
pub use sqlite_album_store::SqliteAlbumStore;
