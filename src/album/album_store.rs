use super::models::{Album, AlbumId, UserId};
use anyhow::Result;
use std::collections::HashSet;

/// Owns album identity, name, slot count and the membership sets.
///
/// Membership validation and permission checks happen above this layer; the
/// store only guarantees that each operation commits atomically.
pub trait AlbumStore: Send + Sync {
    /// Creates an album and its membership rows in one transaction.
    /// Returns the new album id.
    fn create_album(
        &self,
        name: &str,
        owner_id: UserId,
        member_ids: &HashSet<UserId>,
        guest_ids: &HashSet<UserId>,
        slot_count: u32,
    ) -> Result<AlbumId>;

    /// Returns Ok(None) if the album does not exist.
    fn get_album(&self, album_id: AlbumId) -> Result<Option<Album>>;

    /// Replaces the supplied fields wholesale; a `None` leaves the field
    /// untouched. Membership sets are swapped, not merged.
    fn update_album(
        &self,
        album_id: AlbumId,
        name: Option<&str>,
        member_ids: Option<&HashSet<UserId>>,
        guest_ids: Option<&HashSet<UserId>>,
    ) -> Result<()>;

    /// Deletes the album row; pictures and tag rows cascade inside the same
    /// transaction, so the whole album disappears or none of it does.
    fn delete_album(&self, album_id: AlbumId) -> Result<()>;
}
