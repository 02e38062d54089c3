//! Favorite Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::favorites::records::FavoriteRecord;

use crate::{
    books::get::BookSummary, extensions::*, favorites::errors::into_status_error, state::State,
};

/// Favorite Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoriteResponse {
    pub uuid: Uuid,
    pub book: BookSummary,

    /// The date and time the book was marked as a favorite
    pub created_at: String,
}

impl From<FavoriteRecord> for FavoriteResponse {
    fn from(favorite: FavoriteRecord) -> Self {
        Self {
            uuid: favorite.uuid.into(),
            book: favorite.book.into(),
            created_at: favorite.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FavoritesResponse {
    pub favorites: Vec<FavoriteResponse>,
}

/// Favorite Index Handler
#[endpoint(
    tags("favorites"),
    summary = "List Favorites",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FavoritesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let favorites = state
        .app
        .favorites
        .list_favorites(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(FavoritesResponse {
        favorites: favorites.into_iter().map(Into::into).collect(),
    }))
}
