//! Auth data models.

use crate::{
    auth::AuthServiceError,
    domain::users::{
        data::{validate_email, validate_username},
        records::{UserRecord, UserUuid},
    },
};

/// Minimum password length, in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Self-service registration payload.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub(crate) fn validate(&self) -> Result<(), AuthServiceError> {
        validate_username(&self.username).map_err(|_| AuthServiceError::InvalidData)?;
        validate_email(&self.email).map_err(|_| AuthServiceError::InvalidData)?;

        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(AuthServiceError::InvalidData);
        }

        Ok(())
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub uuid: UserUuid,
    pub username: String,
    pub is_admin: bool,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            uuid: user.uuid,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}
