use super::models::{NewPicture, Picture, PictureId, PictureUpdate};
use super::picture_store::PictureStore;
use super::schema::PICTURE_TABLE;
use crate::album::{AlbumId, UserId};
use crate::db::SharedConnection;
use crate::error::ServiceError;
use crate::image_store::ImageRef;
use crate::tag;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, Row};

#[derive(Clone)]
pub struct SqlitePictureStore {
    conn: SharedConnection,
}

impl SqlitePictureStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn picture_from_row(row: &Row) -> rusqlite::Result<Picture> {
        let pictured_at: i64 = row.get(4)?;
        Ok(Picture {
            id: row.get(0)?,
            album_id: row.get(1)?,
            slot_id: row.get(2)?,
            content: row.get(3)?,
            pictured_at: DateTime::from_timestamp(pictured_at, 0).unwrap_or_default(),
            uploader_id: row.get::<_, UserId>(5)?,
            image_ref: ImageRef(row.get(6)?),
            tags: Vec::new(),
        })
    }

    fn load_pictures(
        conn: &Connection,
        album_id: AlbumId,
        picture_id: Option<PictureId>,
    ) -> Result<Vec<Picture>, ServiceError> {
        let mut sql = format!(
            "SELECT id, album_id, slot_id, content, pictured_at, uploader_id, image_ref \
             FROM {} WHERE album_id = ?1",
            PICTURE_TABLE.name
        );
        if picture_id.is_some() {
            sql.push_str(" AND id = ?2");
        }
        sql.push_str(" ORDER BY slot_id ASC");

        let mut stmt = conn.prepare(&sql)?;
        let mut pictures = match picture_id {
            Some(picture_id) => stmt
                .query_map(params![album_id, picture_id], Self::picture_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
            None => stmt
                .query_map(params![album_id], Self::picture_from_row)?
                .collect::<Result<Vec<_>, _>>()?,
        };
        for picture in &mut pictures {
            picture.tags = tag::tags_for_picture(conn, picture.id)?;
        }
        Ok(pictures)
    }
}

impl PictureStore for SqlitePictureStore {
    fn insert_picture(&self, new: NewPicture) -> Result<PictureId, ServiceError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let occupied: i64 = tx.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE album_id = ?1 AND slot_id = ?2",
                PICTURE_TABLE.name
            ),
            params![new.album_id, new.slot_id],
            |row| row.get(0),
        )?;
        if occupied > 0 {
            return Err(ServiceError::SlotOccupied {
                slot_id: new.slot_id,
            });
        }

        // The UNIQUE(album_id, slot_id) constraint backs the check above
        // when another process raced us between check and insert.
        let insert_result = tx.execute(
            &format!(
                "INSERT INTO {} (album_id, slot_id, content, pictured_at, uploader_id, image_ref) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                PICTURE_TABLE.name
            ),
            params![
                new.album_id,
                new.slot_id,
                new.content,
                new.pictured_at.timestamp(),
                new.uploader_id,
                new.image_ref.0,
            ],
        );
        if let Err(rusqlite::Error::SqliteFailure(e, _)) = &insert_result {
            if e.code == ErrorCode::ConstraintViolation {
                return Err(ServiceError::SlotOccupied {
                    slot_id: new.slot_id,
                });
            }
        }
        insert_result?;
        let picture_id = tx.last_insert_rowid();

        tag::attach(&tx, new.album_id, picture_id, new.tags)?;

        tx.commit()?;
        Ok(picture_id)
    }

    fn update_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
        update: &PictureUpdate,
    ) -> Result<Option<ImageRef>, ServiceError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let current_image_ref: Option<String> = tx
            .query_row(
                &format!(
                    "SELECT image_ref FROM {} WHERE id = ?1 AND album_id = ?2",
                    PICTURE_TABLE.name
                ),
                params![picture_id, album_id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        let Some(current_image_ref) = current_image_ref else {
            return Err(ServiceError::PictureNotFound(picture_id));
        };

        if let Some(content) = &update.content {
            tx.execute(
                &format!("UPDATE {} SET content = ?1 WHERE id = ?2", PICTURE_TABLE.name),
                params![content, picture_id],
            )?;
        }
        if let Some(pictured_at) = &update.pictured_at {
            tx.execute(
                &format!(
                    "UPDATE {} SET pictured_at = ?1 WHERE id = ?2",
                    PICTURE_TABLE.name
                ),
                params![pictured_at.timestamp(), picture_id],
            )?;
        }
        if let Some(tags) = &update.tags {
            tag::detach(&tx, picture_id)?;
            tag::attach(&tx, album_id, picture_id, tags)?;
        }
        let mut replaced_image_ref = None;
        if let Some(image_ref) = &update.image_ref {
            tx.execute(
                &format!(
                    "UPDATE {} SET image_ref = ?1 WHERE id = ?2",
                    PICTURE_TABLE.name
                ),
                params![image_ref.0, picture_id],
            )?;
            if current_image_ref != image_ref.0 {
                replaced_image_ref = Some(ImageRef(current_image_ref));
            }
        }

        tx.commit()?;
        Ok(replaced_image_ref)
    }

    fn delete_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
    ) -> Result<ImageRef, ServiceError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let image_ref: Option<String> = tx
            .query_row(
                &format!(
                    "SELECT image_ref FROM {} WHERE id = ?1 AND album_id = ?2",
                    PICTURE_TABLE.name
                ),
                params![picture_id, album_id],
                |row| row.get(0),
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        let Some(image_ref) = image_ref else {
            return Err(ServiceError::PictureNotFound(picture_id));
        };

        tag::detach(&tx, picture_id)?;
        tx.execute(
            &format!("DELETE FROM {} WHERE id = ?1", PICTURE_TABLE.name),
            params![picture_id],
        )?;

        tx.commit()?;
        Ok(ImageRef(image_ref))
    }

    fn get_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
    ) -> Result<Option<Picture>, ServiceError> {
        let conn = self.conn.lock().unwrap();
        let pictures = Self::load_pictures(&conn, album_id, Some(picture_id))?;
        Ok(pictures.into_iter().next())
    }

    fn pictures_in_slots(&self, album_id: AlbumId) -> Result<Vec<Picture>, ServiceError> {
        let conn = self.conn.lock().unwrap();
        Self::load_pictures(&conn, album_id, None)
    }

    fn image_refs_in_album(&self, album_id: AlbumId) -> Result<Vec<ImageRef>, ServiceError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT image_ref FROM {} WHERE album_id = ?1",
            PICTURE_TABLE.name
        ))?;
        let refs = stmt
            .query_map(params![album_id], |row| Ok(ImageRef(row.get(0)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(refs)
    }
}
