use crate::album::{AlbumId, UserId};
use crate::image_store::ImageRef;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub type PictureId = i64;

/// A picture occupying one slot of an album. The slot and album are fixed
/// for the picture's whole life; there is no move operation.
#[derive(Debug, Clone, Serialize)]
pub struct Picture {
    pub id: PictureId,
    pub album_id: AlbumId,
    pub slot_id: u32,
    pub content: String,
    pub pictured_at: DateTime<Utc>,
    pub uploader_id: UserId,
    pub image_ref: ImageRef,
    pub tags: Vec<String>,
}

/// Payload for inserting a picture into an empty slot.
#[derive(Debug, Clone)]
pub struct NewPicture<'a> {
    pub album_id: AlbumId,
    pub slot_id: u32,
    pub content: &'a str,
    pub pictured_at: DateTime<Utc>,
    pub uploader_id: UserId,
    pub image_ref: &'a ImageRef,
    pub tags: &'a [String],
}

/// Partial edit of a picture. A `None` field is left untouched; a `Some`
/// field fully replaces the prior value (tags are a set swap, not a merge).
#[derive(Debug, Clone, Default)]
pub struct PictureUpdate {
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub pictured_at: Option<DateTime<Utc>>,
    pub image_ref: Option<ImageRef>,
}

impl PictureUpdate {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.tags.is_none()
            && self.pictured_at.is_none()
            && self.image_ref.is_none()
    }
}

/// Snapshot of an album's occupied slots, ordered by slot id ascending.
/// Unoccupied slots are omitted; `slot_count` lets callers detect the gaps.
#[derive(Debug, Clone, Serialize)]
pub struct PicturesInSlots {
    pub slot_count: u32,
    pub pictures: Vec<Picture>,
}
