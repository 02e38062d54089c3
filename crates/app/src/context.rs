//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AccessTokenCodec, AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        books::{BooksService, PgBooksService},
        carts::{CartsService, PgCartsService},
        favorites::{FavoritesService, PgFavoritesService},
        orders::{OrdersService, PgOrdersService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub books: Arc<dyn BooksService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub favorites: Arc<dyn FavoritesService>,
}

impl AppContext {
    /// Build application context from a database URL and pool size.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        tokens: AccessTokenCodec,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max_connections(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), tokens))
    }

    #[must_use]
    pub fn from_db(db: Db, tokens: AccessTokenCodec) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), tokens)),
            users: Arc::new(PgUsersService::new(db.clone())),
            books: Arc::new(PgBooksService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            favorites: Arc::new(PgFavoritesService::new(db)),
        }
    }
}
