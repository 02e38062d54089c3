//! Delete Book Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Delete Book Handler
///
/// Hides the book from the catalog and removes it from every cart and
/// favorites list. Past orders keep referencing it. Admin only.
#[endpoint(
    tags("books"),
    summary = "Delete Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Book deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "books.delete",
    skip_all,
    fields(book_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let book = book.into_inner();

    tracing::Span::current().record("book_uuid", tracing::field::display(book));

    state
        .app
        .books
        .delete_book(book.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(book_uuid = %book, "deleted book");

    Ok(StatusCode::NO_CONTENT)
}
