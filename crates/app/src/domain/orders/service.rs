//! Orders service.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

use crate::{
    database::Db,
    domain::{
        carts::records::CartItemUuid,
        orders::{
            checkout::{CheckoutRow, plan_checkout},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    /// Write an order for the locked cart rows and remove exactly those rows.
    async fn place_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        rows: &[CheckoutRow],
    ) -> Result<OrderRecord, OrdersServiceError> {
        let plan = plan_checkout(rows).inspect_err(|error| {
            if let OrdersServiceError::InternalInconsistency(book) = error {
                error!(%user, %book, "cart references a book that no longer resolves");
            }
        })?;

        let mut order = self
            .repository
            .create_order(tx, OrderUuid::new(), user, plan.total_amount)
            .await?;

        for line in &plan.lines {
            self.repository.create_order_item(tx, order.uuid, line).await?;
        }

        let checked_out: Vec<CartItemUuid> = rows.iter().map(|row| row.cart_item_uuid).collect();

        self.repository
            .delete_checked_out_cart_items(tx, user, &checked_out)
            .await?;

        order.items = self.repository.list_order_items(tx, &[order.uuid]).await?;

        Ok(order)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows = self.repository.lock_cart_items(&mut tx, user).await?;

        let order = self.place_order(&mut tx, user, &rows).await?;

        tx.commit().await?;

        info!(
            %user,
            order = %order.uuid,
            items = order.items.len(),
            total_amount = order.total_amount,
            "order created"
        );

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut orders = self.repository.list_orders(&mut tx, user).await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self
            .repository
            .list_order_items(&mut tx, &uuids)
            .await?;

        tx.commit().await?;

        let mut items_by_order: HashMap<OrderUuid, Vec<OrderItemRecord>> = HashMap::new();

        for item in items {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut order = self.repository.get_order(&mut tx, user, order).await?;

        order.items = self
            .repository
            .list_order_items(&mut tx, &[order.uuid])
            .await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Converts the user's cart into a pending order and empties the cart, atomically.
    async fn create_order(&self, user: UserUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Lists the user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Retrieve one of the user's orders. Orders owned by someone else are not found.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
