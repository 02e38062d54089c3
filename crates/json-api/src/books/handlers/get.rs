//! Get Book Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::books::records::BookRecord;

use crate::{books::errors::into_status_error, extensions::*, state::State};

/// Book Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookResponse {
    /// The unique identifier of the book
    pub uuid: Uuid,

    pub title: String,
    pub author: String,
    pub description: Option<String>,

    /// Price in minor units
    pub price: u64,

    pub category: Option<String>,
    pub pdf_url: Option<String>,
    pub cover_image_url: Option<String>,

    /// The date and time the book was added
    pub created_at: String,

    /// The date and time the book was last updated
    pub updated_at: String,
}

impl From<BookRecord> for BookResponse {
    fn from(book: BookRecord) -> Self {
        Self {
            uuid: book.uuid.into(),
            title: book.title,
            author: book.author,
            description: book.description,
            price: book.price,
            category: book.category,
            pdf_url: book.pdf_url,
            cover_image_url: book.cover_image_url,
            created_at: book.created_at.to_string(),
            updated_at: book.updated_at.to_string(),
        }
    }
}

/// Summary of a book embedded in cart, favorite and order responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BookSummary {
    pub uuid: Uuid,
    pub title: String,
    pub author: String,

    /// Current price in minor units
    pub price: u64,

    pub cover_image_url: Option<String>,
}

impl From<BookRecord> for BookSummary {
    fn from(book: BookRecord) -> Self {
        Self {
            uuid: book.uuid.into(),
            title: book.title,
            author: book.author,
            price: book.price,
            cover_image_url: book.cover_image_url,
        }
    }
}

/// Get Book Handler
///
/// Returns a single book from the catalog.
#[endpoint(
    tags("books"),
    summary = "Get Book",
    responses(
        (status_code = StatusCode::OK, description = "Book found"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
    ),
)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BookResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let book = state
        .app
        .books
        .get_book(book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(book.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bookshop_app::{
        context::AppContext,
        domain::books::{BooksServiceError, MockBooksService, records::BookUuid},
    };

    use crate::test_helpers::{anonymous_service, make_book, strict_app};

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        anonymous_service(
            AppContext {
                books: Arc::new(books),
                ..strict_app()
            },
            Router::with_path("books/{book}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_book_is_public() -> TestResult {
        let uuid = BookUuid::new();

        let mut books = MockBooksService::new();

        books
            .expect_get_book()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_book(uuid, 1_250)));

        let mut res = TestClient::get(format!("http://example.com/books/{uuid}"))
            .send(&make_service(books))
            .await;

        let body: BookResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.price, 1_250);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_book_returns_404() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_get_book()
            .once()
            .return_once(|_| Err(BooksServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/books/{}", BookUuid::new()))
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
