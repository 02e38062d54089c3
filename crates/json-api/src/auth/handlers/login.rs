//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bookshop_app::auth::IssuedAccessToken;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Login Request
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Access Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AccessTokenResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,

    /// When the token stops being accepted
    pub expires_at: String,
}

impl From<IssuedAccessToken> for AccessTokenResponse {
    fn from(token: IssuedAccessToken) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type.to_string(),
            expires_at: token.expires_at.to_string(),
        }
    }
}

/// Login Handler
///
/// Exchanges a username and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Incorrect username or password"),
        (status_code = StatusCode::BAD_REQUEST, description = "Inactive user"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "auth.login",
    skip_all,
    fields(username = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<AccessTokenResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    tracing::Span::current().record("username", tracing::field::display(&request.username));

    let token = state
        .app
        .auth
        .login(&request.username, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(token.into()))
}
