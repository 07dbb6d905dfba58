use axum::extract::FromRef;

use crate::album::AlbumManager;
use crate::image_store::ImageStore;
use crate::picture::PictureManager;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedAlbumManager = Arc<AlbumManager>;
pub type GuardedPictureManager = Arc<PictureManager>;
pub type GuardedImageStore = Arc<dyn ImageStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub album_manager: GuardedAlbumManager,
    pub picture_manager: GuardedPictureManager,
    pub image_store: GuardedImageStore,
}

impl FromRef<ServerState> for GuardedAlbumManager {
    fn from_ref(input: &ServerState) -> Self {
        input.album_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedPictureManager {
    fn from_ref(input: &ServerState) -> Self {
        input.picture_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedImageStore {
    fn from_ref(input: &ServerState) -> Self {
        input.image_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
