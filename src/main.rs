use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fourcut_album_server::album::{AlbumManager, AlbumStore, SqliteAlbumStore};
use fourcut_album_server::config::{AppConfig, CliConfig, FileConfig};
use fourcut_album_server::db::open_database;
use fourcut_album_server::image_store::{DiskImageStore, ImageStore};
use fourcut_album_server::picture::{PictureManager, PictureStore, SqlitePictureStore};
use fourcut_album_server::server::{run_server, ServerConfig};
use fourcut_album_server::tag::{SqliteTagIndex, TagIndex};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the SQLite album database.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// Directory holding the image payloads.
    #[clap(long, value_parser = parse_path)]
    pub media_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8080)]
    pub port: u16,

    /// Path to an optional TOML config file; its values override CLI args.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        db_dir: cli_args.db_dir,
        media_dir: cli_args.media_dir,
        port: cli_args.port,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    info!(
        "Opening SQLite album database at {:?}...",
        config.album_db_path()
    );
    let conn = open_database(config.album_db_path())?;

    let album_store: Arc<dyn AlbumStore> = Arc::new(SqliteAlbumStore::new(conn.clone()));
    let picture_store: Arc<dyn PictureStore> = Arc::new(SqlitePictureStore::new(conn.clone()));
    let tag_index: Arc<dyn TagIndex> = Arc::new(SqliteTagIndex::new(conn));
    let image_store: Arc<dyn ImageStore> = Arc::new(DiskImageStore::new(&config.media_dir)?);

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

    run_server(
        ServerConfig { port: config.port },
        album_manager,
        picture_manager,
        image_store,
    )
    .await
}
