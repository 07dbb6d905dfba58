use crate::error::ServiceError;
use serde::Serialize;
use std::collections::HashSet;

pub type AlbumId = i64;
pub type UserId = i64;

/// Every album is laid out as a fixed four-cut strip. The count is stamped
/// onto the album row at creation and never changes afterwards.
pub const DEFAULT_SLOT_COUNT: u32 = 4;

/// A shared album: one owner, disjoint member and guest sets, and a fixed
/// number of picture slots addressed 1..=slot_count.
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub owner_id: UserId,
    pub member_ids: HashSet<UserId>,
    pub guest_ids: HashSet<UserId>,
    pub slot_count: u32,
}

/// Membership invariant: the owner appears in neither set, and no user is
/// both member and guest.
pub fn validate_membership(
    owner_id: UserId,
    member_ids: &HashSet<UserId>,
    guest_ids: &HashSet<UserId>,
) -> Result<(), ServiceError> {
    if member_ids.contains(&owner_id) || guest_ids.contains(&owner_id) {
        return Err(ServiceError::InvalidMembership(format!(
            "owner {} cannot also be a member or guest",
            owner_id
        )));
    }
    if let Some(user_id) = member_ids.intersection(guest_ids).next() {
        return Err(ServiceError::InvalidMembership(format!(
            "user {} cannot be both member and guest",
            user_id
        )));
    }
    Ok(())
}
