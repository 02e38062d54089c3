//! Book Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Book UUID
pub type BookUuid = TypedUuid<BookRecord>;

/// Book Record
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    pub uuid: BookUuid,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: u64,
    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
