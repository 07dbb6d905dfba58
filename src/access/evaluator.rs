use super::role::AlbumRole;
use crate::album::{Album, UserId};
use crate::error::ServiceError;

/// Derives the caller's role from the album's membership sets.
///
/// The sets are kept disjoint by the album registry, so the lookup order
/// here never masks another role.
pub fn role_of(album: &Album, user_id: UserId) -> Option<AlbumRole> {
    if album.owner_id == user_id {
        Some(AlbumRole::Owner)
    } else if album.member_ids.contains(&user_id) {
        Some(AlbumRole::Member)
    } else if album.guest_ids.contains(&user_id) {
        Some(AlbumRole::Guest)
    } else {
        None
    }
}

/// Gate in front of every mutating or sensitive read operation.
///
/// Fails with `PermissionDenied` before any state is touched; callers only
/// proceed on `Ok`.
pub fn require(
    album: &Album,
    user_id: UserId,
    allowed: &[AlbumRole],
) -> Result<AlbumRole, ServiceError> {
    match role_of(album, user_id) {
        Some(role) if allowed.contains(&role) => Ok(role),
        _ => Err(ServiceError::PermissionDenied { user_id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{CAN_EDIT_PICTURES, CAN_MANAGE_ALBUM, CAN_VIEW};
    use std::collections::HashSet;

    fn album() -> Album {
        Album {
            id: 1,
            name: "trip".to_string(),
            owner_id: 10,
            member_ids: HashSet::from([20, 21]),
            guest_ids: HashSet::from([30]),
            slot_count: 4,
        }
    }

    #[test]
    fn role_derivation_is_exhaustive_and_exclusive() {
        let album = album();
        assert_eq!(role_of(&album, 10), Some(AlbumRole::Owner));
        assert_eq!(role_of(&album, 20), Some(AlbumRole::Member));
        assert_eq!(role_of(&album, 21), Some(AlbumRole::Member));
        assert_eq!(role_of(&album, 30), Some(AlbumRole::Guest));
        assert_eq!(role_of(&album, 99), None);
    }

    #[test]
    fn require_allows_listed_roles() {
        let album = album();
        assert_eq!(
            require(&album, 10, CAN_MANAGE_ALBUM).unwrap(),
            AlbumRole::Owner
        );
        assert_eq!(
            require(&album, 20, CAN_EDIT_PICTURES).unwrap(),
            AlbumRole::Member
        );
        assert_eq!(require(&album, 30, CAN_VIEW).unwrap(), AlbumRole::Guest);
    }

    #[test]
    fn require_denies_insufficient_role() {
        let album = album();
        assert!(matches!(
            require(&album, 20, CAN_MANAGE_ALBUM),
            Err(ServiceError::PermissionDenied { user_id: 20 })
        ));
        assert!(matches!(
            require(&album, 30, CAN_EDIT_PICTURES),
            Err(ServiceError::PermissionDenied { user_id: 30 })
        ));
    }

    #[test]
    fn require_denies_strangers_even_for_reads() {
        let album = album();
        assert!(matches!(
            require(&album, 99, CAN_VIEW),
            Err(ServiceError::PermissionDenied { user_id: 99 })
        ));
    }
}
