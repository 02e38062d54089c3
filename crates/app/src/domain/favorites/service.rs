//! Favorites service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        books::records::BookUuid,
        favorites::{
            errors::FavoritesServiceError, records::FavoriteRecord,
            repository::PgFavoritesRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgFavoritesService {
    db: Db,
    repository: PgFavoritesRepository,
}

impl PgFavoritesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFavoritesRepository::new(),
        }
    }
}

#[async_trait]
impl FavoritesService for PgFavoritesService {
    async fn add_favorite(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<FavoriteRecord, FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let favorite = self.repository.create_favorite(&mut tx, user, book).await?;

        tx.commit().await?;

        Ok(favorite)
    }

    async fn list_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<FavoriteRecord>, FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let favorites = self.repository.list_favorites(&mut tx, user).await?;

        tx.commit().await?;

        Ok(favorites)
    }

    async fn remove_favorite(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<(), FavoritesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_favorite(&mut tx, user, book).await?;

        if rows_affected == 0 {
            return Err(FavoritesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait FavoritesService: Send + Sync {
    /// Marks a live book as a favorite of the user.
    async fn add_favorite(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<FavoriteRecord, FavoritesServiceError>;

    /// Lists the user's favorite books, oldest first.
    async fn list_favorites(
        &self,
        user: UserUuid,
    ) -> Result<Vec<FavoriteRecord>, FavoritesServiceError>;

    /// Removes a book from the user's favorites.
    async fn remove_favorite(
        &self,
        user: UserUuid,
        book: BookUuid,
    ) -> Result<(), FavoritesServiceError>;
}
