use anyhow::Result;
use axum::Router;
use tracing::info;

use super::album_routes::album_routes;
use super::picture_routes::picture_routes;
use super::state::{GuardedAlbumManager, GuardedImageStore, GuardedPictureManager, ServerState};
use super::ServerConfig;

pub fn make_app(
    config: ServerConfig,
    album_manager: GuardedAlbumManager,
    picture_manager: GuardedPictureManager,
    image_store: GuardedImageStore,
) -> Router {
    let state = ServerState {
        config,
        album_manager,
        picture_manager,
        image_store,
    };

    let album_api = album_routes().merge(picture_routes());

    Router::new()
        .nest("/api/v1/albums", album_api)
        .with_state(state)
}

pub async fn run_server(
    config: ServerConfig,
    album_manager: GuardedAlbumManager,
    picture_manager: GuardedPictureManager,
    image_store: GuardedImageStore,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, album_manager, picture_manager, image_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on port {}", port);

    Ok(axum::serve(listener, app).await?)
}
