//! Cart to order conversion.

use crate::domain::{
    books::records::BookUuid, carts::records::CartItemUuid, orders::errors::OrdersServiceError,
};

/// A locked cart row with the current price of its book, if the book is still live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckoutRow {
    pub cart_item_uuid: CartItemUuid,
    pub book_uuid: BookUuid,
    pub quantity: u32,
    pub price: Option<u64>,
}

/// An order item to be written, with its price snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderLine {
    pub book_uuid: BookUuid,
    pub position: u32,
    pub quantity: u32,
    pub price_at_purchase: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckoutPlan {
    pub lines: Vec<OrderLine>,
    pub total_amount: u64,
}

/// Snapshot prices and total the cart.
///
/// Fails before anything is written: an empty cart is [`OrdersServiceError::EmptyCart`],
/// a row whose book no longer resolves is [`OrdersServiceError::InternalInconsistency`]
/// and an overflowing total is [`OrdersServiceError::InvalidData`].
pub(crate) fn plan_checkout(rows: &[CheckoutRow]) -> Result<CheckoutPlan, OrdersServiceError> {
    if rows.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    let mut lines = Vec::with_capacity(rows.len());
    let mut total_amount = 0_u64;

    for (position, row) in (0_u32..).zip(rows) {
        let price_at_purchase = row
            .price
            .ok_or(OrdersServiceError::InternalInconsistency(row.book_uuid))?;

        total_amount = price_at_purchase
            .checked_mul(u64::from(row.quantity))
            .and_then(|line_total| total_amount.checked_add(line_total))
            .ok_or(OrdersServiceError::InvalidData)?;

        lines.push(OrderLine {
            book_uuid: row.book_uuid,
            position,
            quantity: row.quantity,
            price_at_purchase,
        });
    }

    Ok(CheckoutPlan {
        lines,
        total_amount,
    })
}
