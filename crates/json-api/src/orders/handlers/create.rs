//! Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    observability,
    orders::{errors::into_status_error, get::OrderResponse},
    state::State,
};

/// Checkout Handler
///
/// Turns the current user's cart into a pending order and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip_all,
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));

    let order = state
        .app
        .orders
        .create_order(user.uuid)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));
    observability::observe_order_placed(order.total_amount);

    res.respond_created(format!("/orders/{}", order.uuid))?;

    Ok(Json(order.into()))
}
