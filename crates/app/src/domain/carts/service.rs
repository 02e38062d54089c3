//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};

use crate::{
    database::Db,
    domain::{
        books::records::BookUuid,
        carts::{
            data::{CartItemUpdate, positive_quantity},
            errors::CartsServiceError,
            records::{CartItemRecord, CartRecord},
            repository::PgCartItemsRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Holds a share lock on the book until `tx` ends, so a book deletion
    /// either runs first (and this fails with `NotFound`) or waits and then
    /// sees the new cart row.
    async fn add_item_in(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        book: BookUuid,
        quantity: u32,
    ) -> Result<CartItemRecord, CartsServiceError> {
        self.items_repository.lock_live_book(tx, book).await?;

        let item = self
            .items_repository
            .upsert_cart_item(tx, user, book, quantity)
            .await?;

        Ok(item)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.items_repository.list_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        CartRecord::from_items(items)
    }

    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: i64,
    ) -> Result<CartItemRecord, CartsServiceError> {
        let quantity = positive_quantity(quantity)?;

        let mut tx = self.db.begin_transaction().await?;

        let item = self.add_item_in(&mut tx, user, book, quantity).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: i64,
    ) -> Result<CartItemUpdate, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let update = if quantity <= 0 {
            let rows_affected = self
                .items_repository
                .delete_cart_item(&mut tx, user, book)
                .await?;

            if rows_affected == 0 {
                return Err(CartsServiceError::NotFound);
            }

            CartItemUpdate::Removed
        } else {
            let item = self
                .items_repository
                .set_cart_item_quantity(&mut tx, user, book, positive_quantity(quantity)?)
                .await?;

            CartItemUpdate::Updated(item)
        };

        tx.commit().await?;

        Ok(update)
    }

    async fn remove_item(&self, user: UserUuid, book: BookUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, book)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Returns the user's cart items, oldest first, with totals at current prices.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Adds `quantity` copies of a book, merging with an existing row for the same book.
    async fn add_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: i64,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Sets an item's quantity; zero or less removes the item.
    async fn update_item(
        &self,
        user: UserUuid,
        book: BookUuid,
        quantity: i64,
    ) -> Result<CartItemUpdate, CartsServiceError>;

    /// Removes a single book from the cart.
    async fn remove_item(&self, user: UserUuid, book: BookUuid) -> Result<(), CartsServiceError>;

    /// Removes every item from the cart.
    async fn clear_cart(&self, user: UserUuid) -> Result<(), CartsServiceError>;
}
