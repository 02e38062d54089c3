//! Orders Repository

use std::str::FromStr;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    books::records::BookUuid,
    carts::records::CartItemUuid,
    columns::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    orders::{
        checkout::{CheckoutRow, OrderLine},
        records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
    },
    users::records::UserUuid,
};

const LOCK_CART_ITEMS_SQL: &str = include_str!("sql/lock_cart_items.sql");
const DELETE_CHECKED_OUT_CART_ITEMS_SQL: &str =
    include_str!("sql/delete_checked_out_cart_items.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Read the user's cart rows and lock them until the transaction ends.
    pub(crate) async fn lock_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CheckoutRow>, sqlx::Error> {
        query_as::<Postgres, CheckoutRow>(LOCK_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Delete the cart rows an order was built from.
    ///
    /// Rows added to the cart after they were locked are left alone.
    pub(crate) async fn delete_checked_out_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        items: &[CartItemUuid],
    ) -> Result<u64, sqlx::Error> {
        let items: Vec<Uuid> = items.iter().map(|item| item.into_uuid()).collect();

        let rows_affected = query(DELETE_CHECKED_OUT_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .bind(items)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        total_amount: u64,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(amount_to_i64(total_amount, "total_amount")?)
            .bind(OrderStatus::Pending.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &OrderLine,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(line.book_uuid.into_uuid())
            .bind(quantity_to_i32(line.position, "position")?)
            .bind(quantity_to_i32(line.quantity, "quantity")?)
            .bind(amount_to_i64(line.price_at_purchase, "price_at_purchase")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Items of the given orders, grouped by order and in checkout position order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().map(|order| order.into_uuid()).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = row
            .try_get::<Option<i64>, _>("price")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "price".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            cart_item_uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            price,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            total_amount: try_get_amount(row, "total_amount")?,
            status: OrderStatus::from_str(&status).map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            book_uuid: BookUuid::from_uuid(row.try_get("book_uuid")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            position: try_get_quantity(row, "position")?,
            quantity: try_get_quantity(row, "quantity")?,
            price_at_purchase: try_get_amount(row, "price_at_purchase")?,
        })
    }
}
