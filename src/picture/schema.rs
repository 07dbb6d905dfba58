use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, DEFAULT_TIMESTAMP,
};

/// The UNIQUE(album_id, slot_id) constraint is the at-most-one-picture-per-
/// slot invariant; a racing insert loses with a constraint violation.
pub const PICTURE_TABLE: Table = Table {
    name: "picture",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_unique = true
        ),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "album",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("slot_id", &SqlType::Integer, non_null = true),
        sqlite_column!("content", &SqlType::Text, non_null = true),
        sqlite_column!("pictured_at", &SqlType::Integer, non_null = true),
        sqlite_column!("uploader_id", &SqlType::Integer, non_null = true),
        sqlite_column!("image_ref", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["album_id", "slot_id"]],
    indices: &[("idx_picture_album_id", "album_id")],
};

/// album_id is denormalized onto the tag rows so a search never has to join
/// through the picture table.
pub const PICTURE_TAG_TABLE: Table = Table {
    name: "picture_tag",
    columns: &[
        sqlite_column!(
            "picture_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "picture",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!("album_id", &SqlType::Integer, non_null = true),
        sqlite_column!("tag", &SqlType::Text, non_null = true),
    ],
    unique_constraints: &[&["picture_id", "tag"]],
    indices: &[("idx_picture_tag_album_id", "album_id")],
};
