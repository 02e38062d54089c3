//! User Data

use crate::domain::users::{errors::UsersServiceError, records::UserUuid};

/// Minimum username length, in characters.
pub const USERNAME_MIN_CHARS: usize = 3;

/// Maximum username length, in characters.
pub const USERNAME_MAX_CHARS: usize = 50;

/// New User Data
///
/// The password must already be hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl NewUser {
    pub(crate) fn validate(&self) -> Result<(), UsersServiceError> {
        validate_username(&self.username)?;
        validate_email(&self.email)
    }
}

/// Partial User Update Data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub(crate) fn validate(&self) -> Result<(), UsersServiceError> {
        if let Some(username) = &self.username {
            validate_username(username)?;
        }

        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        Ok(())
    }
}

pub(crate) fn validate_username(username: &str) -> Result<(), UsersServiceError> {
    let chars = username.chars().count();

    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&chars) {
        return Err(UsersServiceError::InvalidData);
    }

    Ok(())
}

pub(crate) fn validate_email(email: &str) -> Result<(), UsersServiceError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(UsersServiceError::InvalidData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_length_is_bounded() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(50)).is_ok());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn username_length_counts_characters_not_bytes() {
        assert!(validate_username("äöü").is_ok());
    }

    #[test]
    fn email_requires_an_at_sign_between_parts() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("reader.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("reader@").is_err());
    }

    #[test]
    fn update_only_checks_present_fields() {
        assert!(UserUpdate::default().validate().is_ok());

        let update = UserUpdate {
            email: Some("nope".to_string()),
            ..UserUpdate::default()
        };

        assert!(matches!(
            update.validate(),
            Err(UsersServiceError::InvalidData)
        ));
    }
}
