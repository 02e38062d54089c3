//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use bookshop_app::domain::carts::records::{CartItemRecord, CartRecord};

use crate::{
    books::get::BookSummary, cart::errors::into_status_error, extensions::*, state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Items in the order they were first added
    pub items: Vec<CartItemResponse>,

    /// Sum of every line at current prices, in minor units
    pub total_amount: u64,

    /// Number of copies across all items
    pub total_quantity: u64,
}

impl TryFrom<CartRecord> for CartResponse {
    type Error = StatusError;

    fn try_from(cart: CartRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            items: cart
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
            total_amount: cart.total_amount,
            total_quantity: cart.total_quantity,
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub uuid: Uuid,
    pub book: BookSummary,
    pub quantity: u32,

    /// Quantity times the book's current price, in minor units
    pub line_total: u64,

    /// The date and time the book was first added to the cart
    pub added_at: String,

    /// The date and time the quantity last changed
    pub updated_at: String,
}

impl TryFrom<CartItemRecord> for CartItemResponse {
    type Error = StatusError;

    fn try_from(item: CartItemRecord) -> Result<Self, Self::Error> {
        let Some(line_total) = item.line_total() else {
            error!(cart_item_uuid = %item.uuid, "cart line total overflowed");

            return Err(StatusError::internal_server_error());
        };

        Ok(Self {
            uuid: item.uuid.into(),
            book: item.book.into(),
            quantity: item.quantity,
            line_total,
            added_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        })
    }
}

/// Get Cart Handler
///
/// Returns the current user's cart with totals at current prices.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::try_from(cart)?))
}
