mod tag_index;

pub use tag_index::{normalize_tags, SqliteTagIndex, TagIndex, TagMatch};

pub(crate) use tag_index::{attach, detach, tags_for_picture};
