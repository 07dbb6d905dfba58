use super::album_store::AlbumStore;
use super::models::{validate_membership, Album, AlbumId, UserId, DEFAULT_SLOT_COUNT};
use crate::access::{self, AlbumRole, CAN_MANAGE_ALBUM};
use crate::error::{ServiceError, ServiceResult};
use crate::image_store::ImageStore;
use crate::picture::PictureStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Album lifecycle use cases: composes the access evaluator and the album
/// registry, and drives the deletion cascade through the picture ledger.
pub struct AlbumManager {
    albums: Arc<dyn AlbumStore>,
    pictures: Arc<dyn PictureStore>,
    images: Arc<dyn ImageStore>,
}

impl AlbumManager {
    pub fn new(
        albums: Arc<dyn AlbumStore>,
        pictures: Arc<dyn PictureStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            albums,
            pictures,
            images,
        }
    }

    /// The creating user becomes the owner; the slot count is fixed here and
    /// never changes.
    pub fn create_album(
        &self,
        name: &str,
        owner_id: UserId,
        member_ids: HashSet<UserId>,
        guest_ids: HashSet<UserId>,
    ) -> ServiceResult<AlbumId> {
        validate_membership(owner_id, &member_ids, &guest_ids)?;
        let album_id = self.albums.create_album(
            name,
            owner_id,
            &member_ids,
            &guest_ids,
            DEFAULT_SLOT_COUNT,
        )?;
        info!("User {} created album {} ({})", owner_id, album_id, name);
        Ok(album_id)
    }

    /// Owner-only. Supplied membership sets replace the old ones wholesale.
    pub fn update_album(
        &self,
        album_id: AlbumId,
        caller_id: UserId,
        name: Option<&str>,
        member_ids: Option<HashSet<UserId>>,
        guest_ids: Option<HashSet<UserId>>,
    ) -> ServiceResult<()> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_MANAGE_ALBUM)?;

        let next_members = member_ids.as_ref().unwrap_or(&album.member_ids);
        let next_guests = guest_ids.as_ref().unwrap_or(&album.guest_ids);
        validate_membership(album.owner_id, next_members, next_guests)?;

        self.albums
            .update_album(album_id, name, member_ids.as_ref(), guest_ids.as_ref())?;
        Ok(())
    }

    /// Owner-only. The album, its pictures and its tag associations vanish
    /// in one transaction; image payloads are released afterwards.
    pub fn delete_album(&self, album_id: AlbumId, caller_id: UserId) -> ServiceResult<()> {
        let album = self.require_album(album_id)?;
        access::require(&album, caller_id, CAN_MANAGE_ALBUM)?;

        let image_refs = self.pictures.image_refs_in_album(album_id)?;
        self.albums.delete_album(album_id)?;
        for image_ref in &image_refs {
            if let Err(e) = self.images.release(image_ref) {
                warn!("Failed to release image {} of deleted album {}: {}", image_ref.0, album_id, e);
            }
        }

        info!(
            "User {} deleted album {} ({} pictures released)",
            caller_id,
            album_id,
            image_refs.len()
        );
        Ok(())
    }

    /// Never denies: a user outside all membership sets gets `None` back,
    /// only an unknown album fails.
    pub fn get_role(&self, album_id: AlbumId, caller_id: UserId) -> ServiceResult<Option<AlbumRole>> {
        let album = self.require_album(album_id)?;
        Ok(access::role_of(&album, caller_id))
    }

    pub(crate) fn require_album(&self, album_id: AlbumId) -> ServiceResult<Album> {
        self.albums
            .get_album(album_id)?
            .ok_or(ServiceError::AlbumNotFound(album_id))
    }
}
