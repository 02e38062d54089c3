//! Books Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    books::{
        data::{BookDetails, BookFilter, BookUpdate, NewBook},
        records::{BookRecord, BookUuid},
    },
    columns::{amount_to_i64, try_get_amount},
};

const LIST_BOOKS_SQL: &str = include_str!("sql/list_books.sql");
const GET_BOOK_SQL: &str = include_str!("sql/get_book.sql");
const CREATE_BOOK_SQL: &str = include_str!("sql/create_book.sql");
const REPLACE_BOOK_SQL: &str = include_str!("sql/replace_book.sql");
const UPDATE_BOOK_SQL: &str = include_str!("sql/update_book.sql");
const DELETE_BOOK_SQL: &str = include_str!("sql/delete_book.sql");
const DELETE_BOOK_CART_ITEMS_SQL: &str = include_str!("sql/delete_book_cart_items.sql");
const DELETE_BOOK_FAVORITES_SQL: &str = include_str!("sql/delete_book_favorites.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBooksRepository;

impl PgBooksRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_books(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &BookFilter,
    ) -> Result<Vec<BookRecord>, sqlx::Error> {
        query_as::<Postgres, BookRecord>(LIST_BOOKS_SQL)
            .bind(filter.category.as_deref())
            .bind(filter.page.offset_i64())
            .bind(filter.page.limit_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<BookRecord, sqlx::Error> {
        query_as::<Postgres, BookRecord>(GET_BOOK_SQL)
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: NewBook,
    ) -> Result<BookRecord, sqlx::Error> {
        let price = amount_to_i64(book.details.price, "price")?;
        let details = book.details;

        query_as::<Postgres, BookRecord>(CREATE_BOOK_SQL)
            .bind(book.uuid.into_uuid())
            .bind(details.title)
            .bind(details.author)
            .bind(details.description)
            .bind(price)
            .bind(details.category)
            .bind(details.pdf_url)
            .bind(details.cover_image_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn replace_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        details: BookDetails,
    ) -> Result<BookRecord, sqlx::Error> {
        let price = amount_to_i64(details.price, "price")?;

        query_as::<Postgres, BookRecord>(REPLACE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(details.title)
            .bind(details.author)
            .bind(details.description)
            .bind(price)
            .bind(details.category)
            .bind(details.pdf_url)
            .bind(details.cover_image_url)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
        update: BookUpdate,
    ) -> Result<BookRecord, sqlx::Error> {
        let price = update
            .price
            .map(|price| amount_to_i64(price, "price"))
            .transpose()?;

        query_as::<Postgres, BookRecord>(UPDATE_BOOK_SQL)
            .bind(book.into_uuid())
            .bind(update.title)
            .bind(update.author)
            .bind(update.description)
            .bind(price)
            .bind(update.category)
            .bind(update.pdf_url)
            .bind(update.cover_image_url)
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a book. Returns the number of rows marked deleted.
    pub(crate) async fn delete_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BOOK_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Remove a book from every cart and favorites list.
    pub(crate) async fn detach_book(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        book: BookUuid,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_BOOK_CART_ITEMS_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?;

        query(DELETE_BOOK_FAVORITES_SQL)
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for BookRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        decode_book(row, "")
    }
}

/// Decode a book from a row whose book columns carry `prefix`.
///
/// Joined queries alias book columns (e.g. `book_title`) so they do not clash
/// with the columns of the owning table.
pub(crate) fn decode_book(row: &PgRow, prefix: &str) -> sqlx::Result<BookRecord> {
    let col = |name: &str| format!("{prefix}{name}");

    Ok(BookRecord {
        uuid: BookUuid::from_uuid(row.try_get(col("uuid").as_str())?),
        title: row.try_get(col("title").as_str())?,
        author: row.try_get(col("author").as_str())?,
        description: row.try_get(col("description").as_str())?,
        price: try_get_amount(row, &col("price"))?,
        category: row.try_get(col("category").as_str())?,
        pdf_url: row.try_get(col("pdf_url").as_str())?,
        cover_image_url: row.try_get(col("cover_image_url").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(col("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(col("updated_at").as_str())?
            .to_jiff(),
        deleted_at: row
            .try_get::<Option<SqlxTimestamp>, _>(col("deleted_at").as_str())?
            .map(SqlxTimestamp::to_jiff),
    })
}
