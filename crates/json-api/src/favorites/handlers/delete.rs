//! Remove Favorite Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, favorites::errors::into_status_error, state::State};

/// Remove Favorite Handler
#[endpoint(
    tags("favorites"),
    summary = "Remove Favorite",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Favorite removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Favorite not found"),
    ),
)]
#[tracing::instrument(name = "favorites.remove", skip_all, err)]
pub(crate) async fn handler(
    book: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .favorites
        .remove_favorite(user.uuid, book.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use bookshop_app::{
        context::AppContext,
        domain::{
            books::records::BookUuid,
            favorites::{FavoritesServiceError, MockFavoritesService},
        },
    };

    use crate::test_helpers::{TEST_USER_UUID, strict_app, user_service};

    use super::*;

    fn make_service(favorites: MockFavoritesService) -> Service {
        user_service(
            AppContext {
                favorites: Arc::new(favorites),
                ..strict_app()
            },
            Router::with_path("favorites/{book}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_favorite_returns_204() -> TestResult {
        let book = BookUuid::new();

        let mut favorites = MockFavoritesService::new();

        favorites
            .expect_remove_favorite()
            .once()
            .withf(move |user, b| *user == TEST_USER_UUID && *b == book)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/favorites/{book}"))
            .send(&make_service(favorites))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_unknown_favorite_returns_404() -> TestResult {
        let mut favorites = MockFavoritesService::new();

        favorites
            .expect_remove_favorite()
            .once()
            .return_once(|_, _| Err(FavoritesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/favorites/{}", BookUuid::new()))
            .send(&make_service(favorites))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
