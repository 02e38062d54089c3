//! Book Errors

use salvo::http::StatusError;
use tracing::error;

use bookshop_app::domain::books::BooksServiceError;

pub(crate) fn into_status_error(error: BooksServiceError) -> StatusError {
    match error {
        BooksServiceError::AlreadyExists => StatusError::conflict().brief("Book already exists"),
        BooksServiceError::InvalidReference
        | BooksServiceError::MissingRequiredData
        | BooksServiceError::InvalidData => StatusError::bad_request().brief("Invalid book payload"),
        BooksServiceError::NotFound => StatusError::not_found().brief("Book not found"),
        BooksServiceError::Sql(source) => {
            error!("failed to query books: {source}");

            StatusError::internal_server_error()
        }
    }
}
