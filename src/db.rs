use crate::album::schema::{ALBUM_MEMBER_TABLE, ALBUM_TABLE};
use crate::picture::schema::{PICTURE_TAG_TABLE, PICTURE_TABLE};
use crate::sqlite_persistence::{VersionedSchema, BASE_DB_VERSION};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub type SharedConnection = Arc<Mutex<Connection>>;

/// Albums, memberships, pictures and tags live in one database file so the
/// delete-album cascade is a single SQLite transaction.
pub const VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ALBUM_TABLE,
        ALBUM_MEMBER_TABLE,
        PICTURE_TABLE,
        PICTURE_TAG_TABLE,
    ],
    migration: None,
}];

/// Opens (or creates) the album database, validating the schema version and
/// running any pending migrations.
pub fn open_database<P: AsRef<Path>>(db_path: P) -> Result<SharedConnection> {
    let db_path = db_path.as_ref();
    let conn = if db_path.exists() {
        Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open album database {:?}", db_path))?
    } else {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to create album database {:?}", db_path))?;
        VERSIONED_SCHEMAS
            .last()
            .context("No schema versions defined")?
            .create(&conn)?;
        info!("Created album database at {:?}", db_path);
        conn
    };
    // per-connection pragma, cascades depend on it
    conn.execute("PRAGMA foreign_keys = ON;", [])?;

    let db_version = conn
        .query_row("PRAGMA user_version;", [], |row| row.get::<_, i64>(0))
        .context("Failed to read database version")?
        - BASE_DB_VERSION as i64;

    if db_version < 0 {
        bail!(
            "Database {:?} was not created by this server (version marker missing)",
            db_path
        );
    }
    let version = db_version as usize;
    if version >= VERSIONED_SCHEMAS.len() {
        bail!("Database version {} is too new", version);
    }

    VERSIONED_SCHEMAS
        .get(version)
        .context("Failed to get schema")?
        .validate(&conn)?;
    migrate_if_needed(&conn, version)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database with the latest schema; used by tests.
pub fn open_in_memory() -> Result<SharedConnection> {
    let conn = Connection::open_in_memory()?;
    VERSIONED_SCHEMAS
        .last()
        .context("No schema versions defined")?
        .create(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn migrate_if_needed(conn: &Connection, version: usize) -> Result<()> {
    let mut latest = version;
    for schema in VERSIONED_SCHEMAS.iter().skip(version + 1) {
        if let Some(migration_fn) = schema.migration {
            info!("Migrating album db from version {} to {}", latest, schema.version);
            migration_fn(conn)?;
            latest = schema.version;
        }
    }
    conn.execute(
        &format!("PRAGMA user_version = {}", BASE_DB_VERSION + latest),
        [],
    )?;
    Ok(())
}
