//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use bookshop_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => {
            StatusError::not_found().brief("Cart item or book not found")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart data"),
        CartsServiceError::Sql(source) => {
            error!("failed to query cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
