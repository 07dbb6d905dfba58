use crate::album::{AlbumId, UserId};
use crate::picture::PictureId;
use thiserror::Error;

/// Failure kinds surfaced by the album and picture services.
///
/// Permission and occupancy failures are not transient, nothing here is
/// retried internally.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("album {0} does not exist")]
    AlbumNotFound(AlbumId),

    #[error("picture {0} does not exist in this album")]
    PictureNotFound(PictureId),

    #[error("user {user_id} is not allowed to perform this operation")]
    PermissionDenied { user_id: UserId },

    #[error("invalid membership: {0}")]
    InvalidMembership(String),

    #[error("slot {slot_id} is outside the album layout 1..={slot_count}")]
    InvalidSlot { slot_id: u32, slot_count: u32 },

    #[error("slot {slot_id} already holds a picture")]
    SlotOccupied { slot_id: u32 },

    #[error("search keyword must not be empty")]
    InvalidKeyword,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        ServiceError::Store(e.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
