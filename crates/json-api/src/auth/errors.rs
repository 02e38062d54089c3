//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use bookshop_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username or email already registered")
        }
        AuthServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid registration payload")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Incorrect username or password")
        }
        AuthServiceError::Inactive => StatusError::bad_request().brief("Inactive user"),
        AuthServiceError::Unauthorized => {
            StatusError::unauthorized().brief("Invalid or expired access token")
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process access token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("failed to query users: {source}");

            StatusError::internal_server_error()
        }
    }
}
