//! Add Favorite Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    extensions::*,
    favorites::{errors::into_status_error, index::FavoriteResponse},
    state::State,
};

/// Add Favorite Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct AddFavoriteRequest {
    pub book_uuid: Uuid,
}

/// Add Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Add Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Favorite added"),
        (status_code = StatusCode::NOT_FOUND, description = "Book not found"),
        (status_code = StatusCode::CONFLICT, description = "Book is already a favorite"),
    ),
)]
#[tracing::instrument(
    name = "favorites.add",
    skip_all,
    fields(user_uuid = tracing::field::Empty, book_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddFavoriteRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FavoriteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;
    let book = json.into_inner().book_uuid;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user.uuid));
    span.record("book_uuid", tracing::field::display(book));

    let favorite = state
        .app
        .favorites
        .add_favorite(user.uuid, book.into())
        .await
        .map_err(into_status_error)?;

    res.respond_created(format!("/favorites/{book}"))?;

    Ok(Json(favorite.into()))
}
