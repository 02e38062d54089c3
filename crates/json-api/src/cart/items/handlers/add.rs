//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub book_uuid: Uuid,

    /// Copies to add; merged into an existing line for the same book
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added or merged"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.add",
    skip_all,
    fields(
        user_uuid = tracing::field::Empty,
        book_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));
    span.record("book_uuid", tracing::field::display(request.book_uuid));
    span.record("quantity", request.quantity);

    let item = state
        .app
        .carts
        .add_item(user.uuid, request.book_uuid.into(), request.quantity)
        .await
        .map_err(into_status_error)?;

    res.respond_created(format!("/cart/items/{}", request.book_uuid))?;

    Ok(Json(CartItemResponse::try_from(item)?))
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
            Router::with_path("cart/items").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_item_returns_merged_line() -> TestResult {
        let book = BookUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |user, b, quantity| *user == TEST_USER_UUID && *b == book && *quantity == 2)
            .return_once(move |_, _, _| Ok(make_cart_item(book, 1_000, 3)));

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "book_uuid": book.into_uuid(), "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        let body: CartItemResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/cart/items/{book}").as_str()));
        assert_eq!(body.quantity, 3);
        assert_eq!(body.line_total, 3_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_defaults_quantity_to_one() -> TestResult {
        let book = BookUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(|_, _, quantity| *quantity == 1)
            .return_once(move |_, _, _| Ok(make_cart_item(book, 1_000, 1)));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "book_uuid": book.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "book_uuid": BookUuid::new().into_uuid(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_unknown_book_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "book_uuid": BookUuid::new().into_uuid(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
