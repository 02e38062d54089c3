//! Create Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::books::{
    data::{BookDetails, NewBook},
    records::BookUuid,
};

use crate::{
    books::{errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

/// Book Request
///
/// Every editable field; used to create a book and to replace one.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookRequest {
    pub title: String,
    pub author: String,
    pub description: Option<String>,

    /// Price in minor units, greater than zero
    pub price: u64,

    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl From<BookRequest> for BookDetails {
    fn from(request: BookRequest) -> Self {
        BookDetails {
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

/// Create Book Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateBookRequest {
    /// Client-chosen identifier; generated when omitted
    pub uuid: Option<Uuid>,

    #[serde(flatten)]
    pub book: BookRequest,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        NewBook {
            uuid: request.uuid.map_or_else(BookUuid::new, BookUuid::from_uuid),
            details: request.book.into(),
        }
    }
}

/// Create Book Handler
///
/// Admin only.
#[endpoint(
    tags("books"),
    summary = "Create Book",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Book created"),
        (status_code = StatusCode::CONFLICT, description = "Book already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "books.create",
    skip_all,
    fields(admin_uuid = tracing::field::Empty, book_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.current_user_or_401()?;

    tracing::Span::current().record("admin_uuid", tracing::field::display(admin.uuid));

    let book = state
        .app
        .books
        .create_book(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::Span::current().record("book_uuid", tracing::field::display(book.uuid));

    res.respond_created(format!("/books/{}", book.uuid))?;

    tracing::info!(book_uuid = %book.uuid, price = book.price, "created book");

    Ok(Json(book.into()))
}
