//! Signed access tokens.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Token type reported alongside issued access tokens.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Default access token lifetime, in minutes.
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// HMAC key used to sign access tokens. Wiped from memory on drop.
#[derive(Clone)]
pub struct TokenSecret {
    bytes: Vec<u8>,
}

impl TokenSecret {
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: secret.into(),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Username of the token holder.
    pub sub: String,

    /// UUID of the token holder. A username can change hands, the UUID cannot.
    pub uid: Uuid,

    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedAccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_at: Timestamp,
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    #[error("access token has expired")]
    Expired,

    #[error("access token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("access token expiry is out of range")]
    ExpiryOutOfRange(#[source] jiff::Error),
}

impl From<jsonwebtoken::errors::Error> for AccessTokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(error),
        }
    }
}

/// Signs and verifies HS256 access tokens.
#[derive(Debug, Clone)]
pub struct AccessTokenCodec {
    secret: TokenSecret,
    ttl: SignedDuration,
}

impl AccessTokenCodec {
    #[must_use]
    pub fn new(secret: TokenSecret, ttl: SignedDuration) -> Self {
        Self { secret, ttl }
    }

    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Sign a token for the user, valid from now for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry overflows or signing fails.
    pub fn issue(
        &self,
        user: UserUuid,
        username: &str,
    ) -> Result<IssuedAccessToken, AccessTokenError> {
        self.issue_at(user, username, Timestamp::now())
    }

    /// Sign a token for the user as if issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns an error when the expiry overflows or signing fails.
    pub fn issue_at(
        &self,
        user: UserUuid,
        username: &str,
        issued_at: Timestamp,
    ) -> Result<IssuedAccessToken, AccessTokenError> {
        let expires_at = issued_at
            .checked_add(self.ttl)
            .map_err(AccessTokenError::ExpiryOutOfRange)?;

        let claims = AccessTokenClaims {
            sub: username.to_string(),
            uid: user.into_uuid(),
            iat: issued_at.as_second(),
            exp: expires_at.as_second(),
        };

        let access_token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(IssuedAccessToken {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
            expires_at,
        })
    }

    /// Verify the signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::Expired`] for expired tokens and
    /// [`AccessTokenError::Invalid`] for anything else that fails validation.
    pub fn decode(&self, token: &str) -> Result<AccessTokenClaims, AccessTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims)
    }
}
