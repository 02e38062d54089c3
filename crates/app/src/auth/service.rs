//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{
        AccessTokenCodec, AuthServiceError, AuthenticatedUser, IssuedAccessToken, Registration,
        hash_password, verify_dummy_password, verify_password,
    },
    database::Db,
    domain::users::{
        data::NewUser,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    users: PgUsersRepository,
    tokens: AccessTokenCodec,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, tokens: AccessTokenCodec) -> Self {
        Self {
            db,
            users: PgUsersRepository::new(),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, registration: Registration) -> Result<UserRecord, AuthServiceError> {
        registration.validate()?;

        let password_hash = hash_password(&registration.password)?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .users
            .create_user(
                &mut tx,
                NewUser {
                    uuid: UserUuid::new(),
                    username: registration.username,
                    email: registration.email,
                    password_hash,
                    is_admin: false,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedAccessToken, AuthServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.users.find_user_by_username(&mut tx, username).await?;

        tx.commit().await?;

        let Some(user) = user else {
            verify_dummy_password(password);

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthServiceError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AuthServiceError::Inactive);
        }

        Ok(self.tokens.issue(user.uuid, &user.username)?)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError> {
        let claims = self.tokens.decode(bearer_token).map_err(|error| {
            debug!(%error, "rejected access token");

            AuthServiceError::Unauthorized
        })?;

        let mut tx = self.db.begin_transaction().await?;

        let user = self
            .users
            .find_user_by_username(&mut tx, &claims.sub)
            .await?
            .ok_or(AuthServiceError::Unauthorized)?;

        tx.commit().await?;

        if user.uuid.into_uuid() != claims.uid {
            debug!(
                username = %claims.sub,
                "access token belongs to a previous holder of the username"
            );

            return Err(AuthServiceError::Unauthorized);
        }

        if !user.is_active {
            return Err(AuthServiceError::Unauthorized);
        }

        Ok(AuthenticatedUser::from(&user))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a regular (non-admin) account.
    async fn register(&self, registration: Registration) -> Result<UserRecord, AuthServiceError>;

    /// Exchanges a username and password for a signed access token.
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedAccessToken, AuthServiceError>;

    /// Resolves a bearer token to an active user.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedUser, AuthServiceError>;
}
