//! Favorites Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    books::{records::BookUuid, repository::decode_book},
    favorites::records::{FavoriteRecord, FavoriteUuid},
    users::records::UserUuid,
};

const CREATE_FAVORITE_SQL: &str = include_str!("sql/create_favorite.sql");
const LIST_FAVORITES_SQL: &str = include_str!("sql/list_favorites.sql");
const DELETE_FAVORITE_SQL: &str = include_str!("sql/delete_favorite.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFavoritesRepository;

impl PgFavoritesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a favorite for a live book. No row comes back when the book does not exist.
    pub(crate) async fn create_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<FavoriteRecord, sqlx::Error> {
        query_as::<Postgres, FavoriteRecord>(CREATE_FAVORITE_SQL)
            .bind(FavoriteUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(book.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_favorites(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<FavoriteRecord>, sqlx::Error> {
        query_as::<Postgres, FavoriteRecord>(LIST_FAVORITES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_favorite(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FAVORITE_SQL)
            .bind(user.into_uuid())
            .bind(book.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for FavoriteRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FavoriteUuid::from_uuid(row.try_get("uuid")?),
            book: decode_book(row, "book_")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
