use crate::album::AlbumId;
use crate::db::SharedConnection;
use crate::error::ServiceError;
use crate::picture::schema::PICTURE_TAG_TABLE;
use crate::picture::PictureId;
use rusqlite::{params, Connection, Transaction};
use serde::Serialize;

/// A stored tag matching a search keyword, together with the picture that
/// carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMatch {
    pub tag: String,
    pub picture_id: PictureId,
}

/// Per-album reverse mapping from keyword to the pictures carrying it.
///
/// Writes go through `attach`/`detach` inside the ledger's transactions, so
/// a committed picture mutation is immediately visible to `search`.
pub trait TagIndex: Send + Sync {
    /// Case-insensitive substring search over one album's tag set.
    /// The keyword must be non-empty after trimming, else `InvalidKeyword`.
    fn search(&self, album_id: AlbumId, keyword: &str) -> Result<Vec<TagMatch>, ServiceError>;
}

/// Lowercases and trims tags, dropping empties and duplicates. Stored tags
/// are always normalized, which is what makes plain `LIKE` matching
/// case-insensitive.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}

/// Registers the picture's tags. Caller is the slot-picture ledger, inside
/// the same transaction that writes the picture row. Tags must already be
/// normalized.
pub(crate) fn attach(
    tx: &Transaction,
    album_id: AlbumId,
    picture_id: PictureId,
    tags: &[String],
) -> rusqlite::Result<()> {
    for tag in tags {
        tx.execute(
            &format!(
                "INSERT INTO {} (picture_id, album_id, tag) VALUES (?1, ?2, ?3)",
                PICTURE_TAG_TABLE.name
            ),
            params![picture_id, album_id, tag],
        )?;
    }
    Ok(())
}

/// Retracts every tag association of the picture.
pub(crate) fn detach(tx: &Transaction, picture_id: PictureId) -> rusqlite::Result<()> {
    tx.execute(
        &format!(
            "DELETE FROM {} WHERE picture_id = ?1",
            PICTURE_TAG_TABLE.name
        ),
        params![picture_id],
    )?;
    Ok(())
}

pub(crate) fn tags_for_picture(
    conn: &Connection,
    picture_id: PictureId,
) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT tag FROM {} WHERE picture_id = ?1 ORDER BY tag",
        PICTURE_TAG_TABLE.name
    ))?;
    let tags = stmt
        .query_map(params![picture_id], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(tags)
}

fn escape_like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if c == '\\' || c == '%' || c == '_' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Clone)]
pub struct SqliteTagIndex {
    conn: SharedConnection,
}

impl SqliteTagIndex {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

impl TagIndex for SqliteTagIndex {
    fn search(&self, album_id: AlbumId, keyword: &str) -> Result<Vec<TagMatch>, ServiceError> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ServiceError::InvalidKeyword);
        }
        let pattern = format!("%{}%", escape_like_pattern(&keyword));

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT DISTINCT tag, picture_id FROM {} \
             WHERE album_id = ?1 AND tag LIKE ?2 ESCAPE '\\' \
             ORDER BY tag, picture_id",
            PICTURE_TAG_TABLE.name
        ))?;
        let matches = stmt
            .query_map(params![album_id, pattern], |row| {
                Ok(TagMatch {
                    tag: row.get(0)?,
                    picture_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_lowercases_and_dedups() {
        let tags = vec![
            "  Sunset ".to_string(),
            "BEACH".to_string(),
            "sunset".to_string(),
            "   ".to_string(),
        ];
        assert_eq!(normalize_tags(&tags), vec!["sunset", "beach"]);
    }

    #[test]
    fn normalize_of_empty_input_is_empty() {
        assert!(normalize_tags(&[]).is_empty());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(escape_like_pattern("50%_off\\x"), "50\\%\\_off\\\\x");
        assert_eq!(escape_like_pattern("sunset"), "sunset");
    }
}
