//! Favorite Records

use jiff::Timestamp;

use crate::{domain::books::records::BookRecord, uuids::TypedUuid};

/// Favorite UUID
pub type FavoriteUuid = TypedUuid<FavoriteRecord>;

/// Favorite Record, joined with the favorited book.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteRecord {
    pub uuid: FavoriteUuid,
    pub book: BookRecord,
    pub created_at: Timestamp,
}
