//! Favorite Errors

use salvo::http::StatusError;
use tracing::error;

use bookshop_app::domain::favorites::FavoritesServiceError;

pub(crate) fn into_status_error(error: FavoritesServiceError) -> StatusError {
    match error {
        FavoritesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Book is already a favorite")
        }
        FavoritesServiceError::NotFound => StatusError::not_found().brief("Favorite not found"),
        FavoritesServiceError::Sql(source) => {
            error!("failed to query favorites: {source}");

            StatusError::internal_server_error()
        }
    }
}
