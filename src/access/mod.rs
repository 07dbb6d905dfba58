mod evaluator;
mod role;

pub use evaluator::{require, role_of};
pub use role::{AlbumRole, CAN_EDIT_PICTURES, CAN_MANAGE_ALBUM, CAN_VIEW};
