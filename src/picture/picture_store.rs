use super::models::{NewPicture, Picture, PictureId, PictureUpdate};
use crate::album::AlbumId;
use crate::error::ServiceError;
use crate::image_store::ImageRef;

/// The slot-picture ledger: owns the album → slot → picture mapping and the
/// tag associations that travel with each picture.
///
/// Occupancy and existence failures are part of the contract, so methods
/// return `ServiceError` directly. Each method commits as one unit; a failed
/// call leaves no partial write behind.
pub trait PictureStore: Send + Sync {
    /// Atomically checks slot occupancy, inserts the picture and registers
    /// its tags. Fails with `SlotOccupied` if the slot already holds a live
    /// picture; exactly one of two racing callers succeeds.
    ///
    /// On success the image reference is adopted by the stored picture.
    fn insert_picture(&self, new: NewPicture) -> Result<PictureId, ServiceError>;

    /// Replaces the supplied fields; tag replacement retracts all prior
    /// associations and registers the new set in the same transaction.
    /// Returns the previous image reference when the update swapped it, so
    /// the caller can release it.
    fn update_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
        update: &PictureUpdate,
    ) -> Result<Option<ImageRef>, ServiceError>;

    /// Removes the picture and its tag associations, freeing the slot.
    /// Returns the image reference so the caller can release it.
    fn delete_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
    ) -> Result<ImageRef, ServiceError>;

    /// Returns Ok(None) if the picture does not exist in the album.
    fn get_picture(
        &self,
        album_id: AlbumId,
        picture_id: PictureId,
    ) -> Result<Option<Picture>, ServiceError>;

    /// All pictures of the album, ordered by slot id ascending.
    fn pictures_in_slots(&self, album_id: AlbumId) -> Result<Vec<Picture>, ServiceError>;

    /// Image references of every picture in the album; used to release the
    /// payloads after an album deletion cascade.
    fn image_refs_in_album(&self, album_id: AlbumId) -> Result<Vec<ImageRef>, ServiceError>;
}
