//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own database and media
//! directory on a random port.

use super::constants::SERVER_READY_TIMEOUT_MS;
use fourcut_album_server::album::{AlbumManager, AlbumStore, SqliteAlbumStore};
use fourcut_album_server::db::open_database;
use fourcut_album_server::image_store::{DiskImageStore, ImageStore};
use fourcut_album_server::picture::{PictureManager, PictureStore, SqlitePictureStore};
use fourcut_album_server::server::{make_app, ServerConfig};
use fourcut_album_server::tag::{SqliteTagIndex, TagIndex};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with isolated storage.
///
/// When dropped, the server gracefully shuts down and temp resources are
/// cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Media directory, for asserting on stored image payloads
    pub media_dir: std::path::PathBuf,

    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port.
    ///
    /// # Panics
    ///
    /// Panics if storage setup or port binding fails, or if the server does
    /// not become ready within the timeout.
    pub async fn spawn() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let media_dir = temp_dir.path().join("media");

        let conn = open_database(temp_dir.path().join("albums.db"))
            .expect("Failed to open album database");
        let album_store: Arc<dyn AlbumStore> = Arc::new(SqliteAlbumStore::new(conn.clone()));
        let picture_store: Arc<dyn PictureStore> = Arc::new(SqlitePictureStore::new(conn.clone()));
        let tag_index: Arc<dyn TagIndex> = Arc::new(SqliteTagIndex::new(conn));
        let image_store: Arc<dyn ImageStore> =
            Arc::new(DiskImageStore::new(&media_dir).expect("Failed to create image store"));

        let album_manager = Arc::new(AlbumManager::new(
            album_store.clone(),
            picture_store.clone(),
            image_store.clone(),
        ));
        let picture_manager = Arc::new(PictureManager::new(
            album_store,
            picture_store,
            tag_index,
            image_store.clone(),
        ));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let app = make_app(
            ServerConfig { port },
            album_manager,
            picture_manager,
            image_store,
        );

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            media_dir,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Polls an endpoint until the server answers; the status does not
    /// matter, only that the socket is being served.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);
        let url = format!("{}/api/v1/albums/1/roles/me", self.base_url);

        loop {
            if client.get(&url).send().await.is_ok() {
                return;
            }
            if start.elapsed() > timeout {
                panic!("Server did not become ready within {:?}", timeout);
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }
}
