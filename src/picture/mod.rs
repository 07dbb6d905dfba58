mod models;
mod picture_manager;
mod picture_store;
pub mod schema;
mod sqlite_picture_store;

pub use models::{NewPicture, Picture, PictureId, PictureUpdate, PicturesInSlots};
pub use picture_manager::PictureManager;
pub use picture_store::PictureStore;
pub use sqlite_picture_store::SqlitePictureStore;
