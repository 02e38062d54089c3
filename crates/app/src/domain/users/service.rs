//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        pagination::Pagination,
        users::{
            data::{NewUser, UserUpdate},
            errors::UsersServiceError,
            records::{UserRecord, UserUuid},
            repository::PgUsersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn list_users(&self, page: Pagination) -> Result<Vec<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let users = self.repository.list_users(&mut tx, page).await?;

        tx.commit().await?;

        Ok(users)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        user.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError> {
        update.validate()?;

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.update_user(&mut tx, user, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_admin(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .set_user_admin(&mut tx, username, is_admin)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_user(&mut tx, user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Lists users, oldest first.
    async fn list_users(&self, page: Pagination) -> Result<Vec<UserRecord>, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Creates a user from an already hashed password.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Updates only the fields present in `update`.
    async fn update_user(
        &self,
        user: UserUuid,
        update: UserUpdate,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Grants or revokes admin rights by username.
    async fn set_admin(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<UserRecord, UsersServiceError>;

    /// Deletes a user together with their cart, favorites and orders.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{carts::CartsService, orders::OrdersService},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_user_defaults_to_active_non_admin() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx, "reader").await?;

        assert_eq!(user.username, "reader");
        assert_eq!(user.email, "reader@example.com");
        assert!(user.is_active);
        assert!(!user.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_username_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_user(&ctx, "reader").await?;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                username: "reader".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "hash".to_string(),
                is_admin: false,
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_user_duplicate_email_ignores_case() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_user(&ctx, "reader").await?;

        let result = ctx
            .users
            .create_user(NewUser {
                uuid: UserUuid::new(),
                username: "another".to_string(),
                email: "READER@example.com".to_string(),
                password_hash: "hash".to_string(),
                is_admin: false,
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_users_pages_in_creation_order() -> TestResult {
        let ctx = TestContext::new().await;

        let first = helpers::create_user(&ctx, "first").await?;
        let second = helpers::create_user(&ctx, "second").await?;

        let all = ctx.users.list_users(Pagination::default()).await?;
        let tail = ctx.users.list_users(Pagination::new(Some(1), None)).await?;

        assert_eq!(all, vec![first, second.clone()]);
        assert_eq!(tail, vec![second]);

        Ok(())
    }

    #[tokio::test]
    async fn update_user_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "reader").await?;

        let updated = ctx
            .users
            .update_user(
                user.uuid,
                UserUpdate {
                    is_active: Some(false),
                    ..UserUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.username, user.username);
        assert_eq!(updated.email, user.email);
        assert!(!updated.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn set_admin_promotes_by_username() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "reader").await?;

        let promoted = ctx.users.set_admin("reader", true).await?;

        assert_eq!(promoted.uuid, user.uuid);
        assert!(promoted.is_admin);

        Ok(())
    }

    #[tokio::test]
    async fn set_admin_unknown_username_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.set_admin("nobody", true).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_user_cascades_to_cart_and_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "reader").await?;
        let book = helpers::create_book(&ctx, "Dune", 1_000).await?;

        ctx.carts.add_item(user.uuid, book.uuid, 1).await?;
        ctx.orders.create_order(user.uuid).await?;
        ctx.carts.add_item(user.uuid, book.uuid, 2).await?;

        ctx.users.delete_user(user.uuid).await?;

        let remaining: i64 = sqlx::query_scalar(
            "SELECT (SELECT count(*) FROM cart_items) + (SELECT count(*) FROM orders)",
        )
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(remaining, 0);
        assert!(matches!(
            ctx.users.get_user(user.uuid).await,
            Err(UsersServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn delete_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.delete_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
