//! Books service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::books::{
        data::{BookDetails, BookFilter, BookUpdate, NewBook},
        errors::BooksServiceError,
        records::{BookRecord, BookUuid},
        repository::PgBooksRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgBooksService {
    db: Db,
    repository: PgBooksRepository,
}

impl PgBooksService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBooksRepository::new(),
        }
    }
}

#[async_trait]
impl BooksService for PgBooksService {
    async fn list_books(&self, filter: BookFilter) -> Result<Vec<BookRecord>, BooksServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let books = self.repository.list_books(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(books)
    }

    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let book = self.repository.get_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(book)
    }

    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError> {
        book.details.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn replace_book(
        &self,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError> {
        details.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let replaced = self.repository.replace_book(&mut tx, book, details).await?;

        tx.commit().await?;

        Ok(replaced)
    }

    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<BookRecord, BooksServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_book(&mut tx, book, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_book(&self, book: BookUuid) -> Result<(), BooksServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_book(&mut tx, book).await?;

        if rows_affected == 0 {
            return Err(BooksServiceError::NotFound);
        }

        self.repository.detach_book(&mut tx, book).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BooksService: Send + Sync {
    /// Lists live books matching the filter, oldest first.
    async fn list_books(&self, filter: BookFilter) -> Result<Vec<BookRecord>, BooksServiceError>;

    /// Retrieve a single live book.
    async fn get_book(&self, book: BookUuid) -> Result<BookRecord, BooksServiceError>;

    /// Creates a new book.
    async fn create_book(&self, book: NewBook) -> Result<BookRecord, BooksServiceError>;

    /// Replaces every editable field of a book.
    async fn replace_book(
        &self,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, BooksServiceError>;

    /// Updates only the fields present in `update`.
    async fn update_book(
        &self,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<BookRecord, BooksServiceError>;

    /// Soft-deletes a book and removes it from every cart and favorites list.
    async fn delete_book(&self, book: BookUuid) -> Result<(), BooksServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::pagination::Pagination,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_book_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = BookUuid::new();
        let details = helpers::book_details("Dune", 1_250);

        let book = ctx
            .books
            .create_book(NewBook {
                uuid,
                details: details.clone(),
            })
            .await?;

        assert_eq!(book.uuid, uuid);
        assert_eq!(book.title, details.title);
        assert_eq!(book.author, details.author);
        assert_eq!(book.price, 1_250);
        assert!(book.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_book_with_zero_price_is_invalid() {
        let ctx = TestContext::new().await;

        let result = ctx
            .books
            .create_book(NewBook {
                uuid: BookUuid::new(),
                details: helpers::book_details("Free", 0),
            })
            .await;

        assert!(
            matches!(result, Err(BooksServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_book_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.books.get_book(BookUuid::new()).await;

        assert!(
            matches!(result, Err(BooksServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_books_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        let mut scifi = helpers::book_details("Dune", 1_000);
        scifi.category = Some("sci-fi".to_string());

        let mut poetry = helpers::book_details("Odes", 800);
        poetry.category = Some("poetry".to_string());

        let scifi = ctx
            .books
            .create_book(NewBook {
                uuid: BookUuid::new(),
                details: scifi,
            })
            .await?;

        ctx.books
            .create_book(NewBook {
                uuid: BookUuid::new(),
                details: poetry,
            })
            .await?;

        let books = ctx
            .books
            .list_books(BookFilter {
                category: Some("sci-fi".to_string()),
                page: Pagination::default(),
            })
            .await?;

        assert_eq!(books, vec![scifi]);

        Ok(())
    }

    #[tokio::test]
    async fn list_books_applies_offset_and_limit_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;

        let first = helpers::create_book(&ctx, "First", 100).await?;
        let second = helpers::create_book(&ctx, "Second", 200).await?;
        let third = helpers::create_book(&ctx, "Third", 300).await?;

        let all = ctx.books.list_books(BookFilter::default()).await?;
        let page = ctx
            .books
            .list_books(BookFilter {
                category: None,
                page: Pagination::new(Some(1), Some(1)),
            })
            .await?;

        assert_eq!(
            all.iter().map(|book| book.uuid).collect::<Vec<_>>(),
            vec![first.uuid, second.uuid, third.uuid]
        );
        assert_eq!(page, vec![second]);

        Ok(())
    }

    #[tokio::test]
    async fn replace_book_overwrites_optional_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let mut details = helpers::book_details("Dune", 1_000);
        details.description = Some("Spice".to_string());

        let uuid = BookUuid::new();
        ctx.books.create_book(NewBook { uuid, details }).await?;

        let replaced = ctx
            .books
            .replace_book(uuid, helpers::book_details("Dune Messiah", 1_100))
            .await?;

        assert_eq!(replaced.title, "Dune Messiah");
        assert_eq!(replaced.price, 1_100);
        assert!(replaced.description.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_book_keeps_unspecified_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let book = helpers::create_book(&ctx, "Dune", 1_000).await?;

        let updated = ctx
            .books
            .update_book(
                book.uuid,
                BookUpdate {
                    price: Some(1_500),
                    ..BookUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.title, book.title);
        assert_eq!(updated.author, book.author);
        assert_eq!(updated.price, 1_500);

        Ok(())
    }

    #[tokio::test]
    async fn update_book_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .books
            .update_book(
                BookUuid::new(),
                BookUpdate {
                    title: Some("Nope".to_string()),
                    ..BookUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(BooksServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_book_hides_it_from_catalog() -> TestResult {
        let ctx = TestContext::new().await;
        let book = helpers::create_book(&ctx, "Dune", 1_000).await?;

        ctx.books.delete_book(book.uuid).await?;

        let result = ctx.books.get_book(book.uuid).await;
        let listed = ctx.books.list_books(BookFilter::default()).await?;

        assert!(
            matches!(result, Err(BooksServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );
        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_book_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let book = helpers::create_book(&ctx, "Dune", 1_000).await?;

        ctx.books.delete_book(book.uuid).await?;

        let result = ctx.books.delete_book(book.uuid).await;

        assert!(
            matches!(result, Err(BooksServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_book_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = BookUuid::new();

        ctx.books
            .create_book(NewBook {
                uuid,
                details: helpers::book_details("Dune", 1_000),
            })
            .await?;

        let result = ctx
            .books
            .create_book(NewBook {
                uuid,
                details: helpers::book_details("Dune", 1_000),
            })
            .await;

        assert!(
            matches!(result, Err(BooksServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
