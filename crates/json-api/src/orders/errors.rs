//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use bookshop_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order data"),
        OrdersServiceError::InternalInconsistency(book) => {
            error!(book_uuid = %book, "cart references a book that no longer resolves");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to query orders: {source}");

            StatusError::internal_server_error()
        }
    }
}
