//! Book Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bookshop_app::domain::books::data::BookFilter;

use crate::{
    books::{errors::into_status_error, get::BookResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BooksResponse {
    /// The page of books, in catalog order
    pub books: Vec<BookResponse>,
}

/// Book Index Handler
///
/// Lists the catalog, optionally filtered by category.
#[endpoint(tags("books"), summary = "List Books")]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    offset: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<BooksResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = BookFilter {
        category: category.into_inner(),
        page: (offset, limit).into_pagination(),
    };

    let books = state
        .app
        .books
        .list_books(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(BooksResponse {
        books: books.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use bookshop_app::{
        context::AppContext,
        domain::{
            books::{MockBooksService, records::BookUuid},
            pagination::Pagination,
        },
    };

    use crate::test_helpers::{anonymous_service, make_book, strict_app};

    use super::*;

    fn make_service(books: MockBooksService) -> Service {
        anonymous_service(
            AppContext {
                books: Arc::new(books),
                ..strict_app()
            },
            Router::with_path("books").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_books() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .withf(|filter| *filter == BookFilter::default())
            .return_once(|_| {
                Ok(vec![
                    make_book(BookUuid::new(), 100),
                    make_book(BookUuid::new(), 200),
                ])
            });

        let mut res = TestClient::get("http://example.com/books")
            .send(&make_service(books))
            .await;

        let body: BooksResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.books.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_category_and_page() -> TestResult {
        let mut books = MockBooksService::new();

        books
            .expect_list_books()
            .once()
            .withf(|filter| {
                *filter
                    == BookFilter {
                        category: Some("poetry".to_string()),
                        page: Pagination::new(Some(10), Some(5)),
                    }
            })
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/books?category=poetry&offset=10&limit=5")
            .send(&make_service(books))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
