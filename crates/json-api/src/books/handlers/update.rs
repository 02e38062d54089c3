//! Update Book Handler

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

use bookshop_app::domain::books::data::BookUpdate;

use crate::{
    books::{errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

/// Update Book Request
///
/// Omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<UpdateBookRequest> for BookUpdate {
    fn from(request: UpdateBookRequest) -> Self {
        BookUpdate {
            title: request.title,
            author: request.author,
            description: request.description,
            price: request.price,
            category: request.category,
            pdf_url: request.pdf_url,
            cover_image_url: request.cover_image_url,
        }
    }
}

/// Update Book Handler
///
/// Admin only.
#[endpoint(
    tags("books"),
    summary = "Update Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Book updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "books.update",
    skip_all,
    fields(admin_uuid = tracing::field::Empty, book_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    json: JsonBody<UpdateBookRequest>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.current_user_or_401()?;
    let book = book.into_inner();

    let span = tracing::Span::current();

    span.record("admin_uuid", tracing::field::display(admin.uuid));
    span.record("book_uuid", tracing::field::display(book));

    let updated = state
        .app
        .books
        .update_book(book.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(book_uuid = %book, price = updated.price, "updated book");

    Ok(Json(updated.into()))
}
