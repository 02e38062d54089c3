//! Replace Book Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    books::{create::BookRequest, errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

/// Replace Book Handler
///
/// Overwrites every editable field; omitted optional fields are cleared. Admin only.
#[endpoint(
    tags("books"),
    summary = "Replace Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book replaced"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "books.replace",
    skip_all,
    fields(admin_uuid = tracing::field::Empty, book_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<BookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.current_user_or_401()?;
    let book = book.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin.uuid));
    span.record("book_uuid", tracing::field::display(book));

    let replaced = state
        .app
        .books
        .replace_book(book.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(book_uuid = %book, "replaced book");

    Ok(Json(replaced.into()))
}
