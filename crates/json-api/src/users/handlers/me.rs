//! Current User Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookshop_app::domain::users::records::UserRecord;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// User Response
///
/// The password hash is never exposed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_admin: bool,

    /// The date and time the user registered
    pub created_at: String,

    /// The date and time the user was last updated
    pub updated_at: String,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            uuid: user.uuid.into(),
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            is_admin: user.is_admin,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

/// Current User Handler
///
/// Returns the authenticated user.
#[endpoint(
    tags("users"),
    summary = "Current User",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let current = depot.current_user_or_401()?;

    let user = state
        .app
        .users
        .get_user(current.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
