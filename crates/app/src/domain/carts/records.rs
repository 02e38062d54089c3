//! Cart Records

use jiff::Timestamp;

use crate::{domain::books::records::BookRecord, uuids::TypedUuid};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record, joined with the book it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub quantity: u32,
    pub book: BookRecord,
    /// When the book was first added to the cart.
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemRecord {
    /// Quantity times the book's current price, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.book.price.checked_mul(u64::from(self.quantity))
    }
}

/// A user's cart with aggregate totals at current prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartRecord {
    pub items: Vec<CartItemRecord>,
    pub total_amount: u64,
    pub total_quantity: u64,
}
