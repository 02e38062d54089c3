//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::orders::records::{OrderItemRecord, OrderRecord};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Sum of every item's quantity times its purchase price, in minor units
    pub total_amount: u64,

    /// One of `pending`, `completed` or `cancelled`
    pub status: String,

    /// Items in the order they appeared in the cart
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,
    pub book_uuid: Uuid,
    pub title: String,
    pub author: String,

    /// Zero-based position of the item within the order
    pub position: u32,

    pub quantity: u32,

    /// Book price when the order was placed, in minor units
    pub price_at_purchase: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            book_uuid: item.book_uuid.into(),
            title: item.title,
            author: item.author,
            position: item.position,
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
        }
    }
}

/// Get Order Handler
///
/// Returns one of the current user's orders. Orders placed by other users are
/// reported as not found.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(user.uuid, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bookshop_app::{
        context::AppContext,
        domain::orders::{MockOrdersService, OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{TEST_USER_UUID, strict_app, user_service};

    use super::{super::tests::make_order, *};

    fn make_service(orders: MockOrdersService) -> Service {
        user_service(
            AppContext {
                orders: Arc::new(orders),
                ..strict_app()
            },
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_own_order_returns_items() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |user, o| *user == TEST_USER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, &[(1_250, 2), (999, 1)])));

        let mut res = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, "pending");
        assert_eq!(body.total_amount, 3_499);
        assert_eq!(
            body.items
                .iter()
                .map(|item| item.price_at_purchase * u64::from(item.quantity))
                .sum::<u64>(),
            body.total_amount
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_get_other_users_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
