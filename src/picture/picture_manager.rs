use super::models::{NewPicture, Picture, PictureId, PictureUpdate, PicturesInSlots};
use super::picture_store::PictureStore;
use crate::access::{self, CAN_EDIT_PICTURES, CAN_VIEW};
use crate::album::{Album, AlbumId, AlbumStore, UserId};
use crate::error::{ServiceError, ServiceResult};
use crate::image_store::{ImageRef, ImageStore};
use crate::tag::{normalize_tags, TagIndex, TagMatch};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Picture use cases: every operation resolves the album, gates on the
/// caller's role, then delegates to the slot ledger and the tag index.
pub struct PictureManager {
    albums: Arc<dyn AlbumStore>,
    pictures: Arc<dyn PictureStore>,
    tags: Arc<dyn TagIndex>,
    images: Arc<dyn ImageStore>,
}

impl PictureManager {
    pub fn new(
        albums: Arc<dyn AlbumStore>,
        pictures: Arc<dyn PictureStore>,
        tags: Arc<dyn TagIndex>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            albums,
            pictures,
            tags,
            images,
        }
    }

    /// Owner or member only. The slot must be inside the album's range and
    /// empty; of two racing callers exactly one wins the slot.
    ///
    /// The image reference is adopted only on success; on any failure it
    /// stays with the caller, who is responsible for releasing it.
    #[allow(clippy::too_many_arguments)]
    pub fn create_in_slot(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        slot_id: u32,
        content: &str,
        pictured_at: DateTime<Utc>,
        image_ref: &ImageRef,
        tags: &[String],
    ) -> ServiceResult<PictureId> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_EDIT_PICTURES)?;
        if slot_id == 0 || slot_id > album.slot_count {
            return Err(ServiceError::InvalidSlot {
                slot_id,
                slot_count: album.slot_count,
            });
        }

        let tags = normalize_tags(tags);
        let picture_id = self.pictures.insert_picture(NewPicture {
            album_id,
            slot_id,
            content,
            pictured_at,
            uploader_id: caller_id,
            image_ref,
            tags: &tags,
        })?;
        info!(
            "User {} filled slot {} of album {} with picture {}",
            caller_id, slot_id, album_id, picture_id
        );
        Ok(picture_id)
    }

    /// Owner or member only. Supplied fields replace the old values; when
    /// the image is swapped the previous payload is released.
    pub fn update_picture(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        picture_id: PictureId,
        mut update: PictureUpdate,
    ) -> ServiceResult<()> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_EDIT_PICTURES)?;

        if let Some(tags) = update.tags.take() {
            update.tags = Some(normalize_tags(&tags));
        }
        let replaced = self.pictures.update_picture(album_id, picture_id, &update)?;
        if let Some(old_ref) = replaced {
            if let Err(e) = self.images.release(&old_ref) {
                warn!(
                    "Failed to release replaced image {} of picture {}: {}",
                    old_ref.0, picture_id, e
                );
            }
        }
        Ok(())
    }

    /// Owner or member only. Frees the slot and releases the image payload.
    pub fn delete_picture(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        picture_id: PictureId,
    ) -> ServiceResult<()> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_EDIT_PICTURES)?;

        let image_ref = self.pictures.delete_picture(album_id, picture_id)?;
        if let Err(e) = self.images.release(&image_ref) {
            warn!(
                "Failed to release image {} of deleted picture {}: {}",
                image_ref.0, picture_id, e
            );
        }
        Ok(())
    }

    /// Any role may view, guests included.
    pub fn get_picture(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        picture_id: PictureId,
    ) -> ServiceResult<Picture> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_VIEW)?;
        self.pictures
            .get_picture(album_id, picture_id)?
            .ok_or(ServiceError::PictureNotFound(picture_id))
    }

    /// Any role may view. Empty slots are simply absent from the result.
    pub fn pictures_in_slots(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
    ) -> ServiceResult<PicturesInSlots> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_VIEW)?;
        let pictures = self.pictures.pictures_in_slots(album_id)?;
        Ok(PicturesInSlots {
            slot_count: album.slot_count,
            pictures,
        })
    }

    /// Case-insensitive substring search over the album's tags; open to any
    /// role, guests included.
    pub fn search_tags(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        keyword: &str,
    ) -> ServiceResult<Vec<TagMatch>> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_VIEW)?;
        self.tags.search(album_id, keyword)
    }

    fn require_album(&self, album_id: AlbumId) -> ServiceResult<Album> {
        self.albums
            .get_album(album_id)?
            .ok_or(ServiceError::AlbumNotFound(album_id))
    }
}
