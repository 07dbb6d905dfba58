use super::album_store::AlbumStore;
use super::models::{Album, AlbumId, UserId};
use super::schema::{ALBUM_MEMBER_TABLE, ALBUM_TABLE};
use crate::access::AlbumRole;
use crate::db::SharedConnection;
use anyhow::{Context, Result};
use rusqlite::{params, Transaction};
use std::collections::HashSet;

#[derive(Clone)]
pub struct SqliteAlbumStore {
    conn: SharedConnection,
}

impl SqliteAlbumStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    fn replace_membership_rows(
        tx: &Transaction,
        album_id: AlbumId,
        role: AlbumRole,
        user_ids: &HashSet<UserId>,
    ) -> Result<()> {
        tx.execute(
            &format!(
                "DELETE FROM {} WHERE album_id = ?1 AND role = ?2",
                ALBUM_MEMBER_TABLE.name
            ),
            params![album_id, role.as_str()],
        )?;
        for user_id in user_ids {
            tx.execute(
                &format!(
                    "INSERT INTO {} (album_id, user_id, role) VALUES (?1, ?2, ?3)",
                    ALBUM_MEMBER_TABLE.name
                ),
                params![album_id, user_id, role.as_str()],
            )?;
        }
        Ok(())
    }
}

impl AlbumStore for SqliteAlbumStore {
    fn create_album(
        &self,
        name: &str,
        owner_id: UserId,
        member_ids: &HashSet<UserId>,
        guest_ids: &HashSet<UserId>,
        slot_count: u32,
    ) -> Result<AlbumId> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            &format!(
                "INSERT INTO {} (name, owner_id, slot_count) VALUES (?1, ?2, ?3)",
                ALBUM_TABLE.name
            ),
            params![name, owner_id, slot_count],
        )
        .with_context(|| format!("Failed to create album {}", name))?;
        let album_id = tx.last_insert_rowid();

        Self::replace_membership_rows(&tx, album_id, AlbumRole::Member, member_ids)?;
        Self::replace_membership_rows(&tx, album_id, AlbumRole::Guest, guest_ids)?;

        tx.commit()?;
        Ok(album_id)
    }

    fn get_album(&self, album_id: AlbumId) -> Result<Option<Album>> {
        let conn = self.conn.lock().unwrap();

        let header = conn
            .query_row(
                &format!(
                    "SELECT name, owner_id, slot_count FROM {} WHERE id = ?1",
                    ALBUM_TABLE.name
                ),
                params![album_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, UserId>(1)?,
                        row.get::<_, u32>(2)?,
                    ))
                },
            )
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;

        let Some((name, owner_id, slot_count)) = header else {
            return Ok(None);
        };

        let mut member_ids = HashSet::new();
        let mut guest_ids = HashSet::new();
        let mut stmt = conn.prepare(&format!(
            "SELECT user_id, role FROM {} WHERE album_id = ?1",
            ALBUM_MEMBER_TABLE.name
        ))?;
        let rows = stmt.query_map(params![album_id], |row| {
            Ok((row.get::<_, UserId>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (user_id, role) = row?;
            match AlbumRole::from_str(&role) {
                Some(AlbumRole::Member) => {
                    member_ids.insert(user_id);
                }
                Some(AlbumRole::Guest) => {
                    guest_ids.insert(user_id);
                }
                _ => {}
            }
        }

        Ok(Some(Album {
            id: album_id,
            name,
            owner_id,
            member_ids,
            guest_ids,
            slot_count,
        }))
    }

    fn update_album(
        &self,
        album_id: AlbumId,
        name: Option<&str>,
        member_ids: Option<&HashSet<UserId>>,
        guest_ids: Option<&HashSet<UserId>>,
    ) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        if let Some(name) = name {
            tx.execute(
                &format!("UPDATE {} SET name = ?1 WHERE id = ?2", ALBUM_TABLE.name),
                params![name, album_id],
            )?;
        }
        if let Some(member_ids) = member_ids {
            Self::replace_membership_rows(&tx, album_id, AlbumRole::Member, member_ids)?;
        }
        if let Some(guest_ids) = guest_ids {
            Self::replace_membership_rows(&tx, album_id, AlbumRole::Guest, guest_ids)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_album(&self, album_id: AlbumId) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", ALBUM_TABLE.name),
            params![album_id],
        )
        .with_context(|| format!("Failed to delete album {}", album_id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn store() -> SqliteAlbumStore {
        SqliteAlbumStore::new(open_in_memory().unwrap())
    }

    #[test]
    fn create_then_get_roundtrips() {
        let store = store();
        let members = HashSet::from([2, 3]);
        let guests = HashSet::from([4]);
        let id = store.create_album("trip", 1, &members, &guests, 4).unwrap();

        let album = store.get_album(id).unwrap().unwrap();
        assert_eq!(album.name, "trip");
        assert_eq!(album.owner_id, 1);
        assert_eq!(album.member_ids, members);
        assert_eq!(album.guest_ids, guests);
        assert_eq!(album.slot_count, 4);
    }

    #[test]
    fn get_unknown_album_is_none() {
        let store = store();
        assert!(store.get_album(123).unwrap().is_none());
    }

    #[test]
    fn update_replaces_membership_wholesale() {
        let store = store();
        let id = store
            .create_album("trip", 1, &HashSet::from([2, 3]), &HashSet::from([4]), 4)
            .unwrap();

        store
            .update_album(id, None, Some(&HashSet::from([5])), None)
            .unwrap();

        let album = store.get_album(id).unwrap().unwrap();
        assert_eq!(album.name, "trip");
        assert_eq!(album.member_ids, HashSet::from([5]));
        // guests untouched
        assert_eq!(album.guest_ids, HashSet::from([4]));
    }

    #[test]
    fn update_name_only() {
        let store = store();
        let id = store
            .create_album("trip", 1, &HashSet::from([2]), &HashSet::new(), 4)
            .unwrap();

        store.update_album(id, Some("summer"), None, None).unwrap();

        let album = store.get_album(id).unwrap().unwrap();
        assert_eq!(album.name, "summer");
        assert_eq!(album.member_ids, HashSet::from([2]));
    }

    #[test]
    fn delete_removes_album_and_membership() {
        let store = store();
        let id = store
            .create_album("trip", 1, &HashSet::from([2]), &HashSet::from([3]), 4)
            .unwrap();

        store.delete_album(id).unwrap();
        assert!(store.get_album(id).unwrap().is_none());
    }
}
