use serde::{Deserialize, Serialize};

/// Permission tier of a user inside a single album, derived on demand from
/// the album's membership sets. A user appearing in none of them has no role
/// (`Option::None`) and no access at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlbumRole {
    Owner,
    Member,
    Guest,
}

/// Album lifecycle operations: rename, re-member, delete.
pub const CAN_MANAGE_ALBUM: &[AlbumRole] = &[AlbumRole::Owner];

/// Picture mutations: upload into a slot, edit, delete.
pub const CAN_EDIT_PICTURES: &[AlbumRole] = &[AlbumRole::Owner, AlbumRole::Member];

/// Read-level access: list pictures, read own role, search tags.
pub const CAN_VIEW: &[AlbumRole] = &[AlbumRole::Owner, AlbumRole::Member, AlbumRole::Guest];

impl AlbumRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AlbumRole::Owner => "Owner",
            AlbumRole::Member => "Member",
            AlbumRole::Guest => "Guest",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "owner" => Some(AlbumRole::Owner),
            "member" => Some(AlbumRole::Member),
            "guest" => Some(AlbumRole::Guest),
            _ => None,
        }
    }
}
