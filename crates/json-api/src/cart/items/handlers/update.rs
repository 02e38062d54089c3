//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::carts::data::CartItemUpdate;

use crate::{
    cart::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the item
    pub quantity: i64,
}

/// Update Cart Item Handler
///
/// Responds with the updated line, or `204 No Content` when the item was removed.
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated", body = CartItemResponse),
        (status_code = StatusCode::NO_CONTENT, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Item not in cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.update",
    skip_all,
    fields(
        user_uuid = tracing::field::Empty,
        book_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let book = book.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));
    span.record("book_uuid", tracing::field::display(book));
    span.record("quantity", quantity);

    let outcome = state
        .app
        .carts
        .update_item(user.uuid, book.into(), quantity)
        .await
        .map_err(into_status_error)?;

    match outcome {
        CartItemUpdate::Updated(item) => {
            res.render(Json(CartItemResponse::try_from(item)?));
        }
        CartItemUpdate::Removed => {
            res.status_code(StatusCode::NO_CONTENT);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bookshop_app::{
        context::AppContext,
        domain::{
            books::records::BookUuid,
            carts::{CartsServiceError, MockCartsService},
        },
    };

    use crate::{
        cart::tests::make_cart_item,
        test_helpers::{TEST_USER_UUID, strict_app, user_service},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        user_service(
            AppContext {
                carts: Arc::new(carts),
                ..strict_app()
            },
            Router::with_path("cart/items/{book}").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_update_item_sets_quantity() -> TestResult {
        let book = BookUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(move |user, b, quantity| *user == TEST_USER_UUID && *b == book && *quantity == 5)
            .return_once(move |_, _, _| {
                Ok(CartItemUpdate::Updated(make_cart_item(book, 200, 5)))
            });

        let mut res = TestClient::patch(format!("http://example.com/cart/items/{book}"))
            .json(&json!({ "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.quantity, 5);
        assert_eq!(body.line_total, 1_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_to_zero_returns_204() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .withf(|_, _, quantity| *quantity == 0)
            .return_once(|_, _, _| Ok(CartItemUpdate::Removed));

        let res = TestClient::patch(format!("http://example.com/cart/items/{}", BookUuid::new()))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::patch(format!("http://example.com/cart/items/{}", BookUuid::new()))
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
