//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::{
    auth::{AccessTokenError, PasswordError},
    domain::users::UsersServiceError,
};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("username or email already registered")]
    AlreadyExists,

    #[error("invalid registration data")]
    InvalidData,

    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("user account is inactive")]
    Inactive,

    #[error("not authenticated")]
    Unauthorized,

    #[error("password processing error")]
    Password(#[source] PasswordError),

    #[error("token processing error")]
    Token(#[source] AccessTokenError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        UsersServiceError::from(error).into()
    }
}

impl From<UsersServiceError> for AuthServiceError {
    fn from(error: UsersServiceError) -> Self {
        match error {
            UsersServiceError::AlreadyExists => Self::AlreadyExists,
            UsersServiceError::InvalidData | UsersServiceError::MissingRequiredData => {
                Self::InvalidData
            }
            UsersServiceError::NotFound => Self::Unauthorized,
            UsersServiceError::Sql(error) => Self::Sql(error),
        }
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(error: PasswordError) -> Self {
        Self::Password(error)
    }
}

impl From<AccessTokenError> for AuthServiceError {
    fn from(error: AccessTokenError) -> Self {
        Self::Token(error)
    }
}
