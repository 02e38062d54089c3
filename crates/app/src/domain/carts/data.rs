//! Cart Data

use crate::domain::carts::{
    errors::CartsServiceError,
    records::{CartItemRecord, CartRecord},
};

/// Outcome of setting an item's quantity.
#[derive(Debug, Clone, PartialEq)]
pub enum CartItemUpdate {
    /// The quantity was set to a positive value.
    Updated(CartItemRecord),

    /// A non-positive quantity removed the item.
    Removed,
}

/// Accept quantities in `1..=i32::MAX`, the range the `INTEGER` column can hold.
pub(crate) fn positive_quantity(quantity: i64) -> Result<u32, CartsServiceError> {
    if quantity <= 0 || quantity > i64::from(i32::MAX) {
        return Err(CartsServiceError::InvalidQuantity);
    }

    u32::try_from(quantity).map_err(|_| CartsServiceError::InvalidQuantity)
}

impl CartRecord {
    /// Build a cart from its items, summing totals with checked arithmetic.
    pub(crate) fn from_items(items: Vec<CartItemRecord>) -> Result<Self, CartsServiceError> {
        let mut total_amount = 0_u64;
        let mut total_quantity = 0_u64;

        for item in &items {
            total_amount = item
                .line_total()
                .and_then(|line| total_amount.checked_add(line))
                .ok_or(CartsServiceError::InvalidData)?;

            total_quantity = total_quantity
                .checked_add(u64::from(item.quantity))
                .ok_or(CartsServiceError::InvalidData)?;
        }

        Ok(Self {
            items,
            total_amount,
            total_quantity,
        })
    }
}
