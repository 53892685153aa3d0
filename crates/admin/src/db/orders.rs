//! Pickup order repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use curbside_core::{OrderId, OrderItemId, OrderStatus, Price};

use super::RepositoryError;
use crate::models::{Order, OrderItem, OrderListEntry};

/// Internal row type for order queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    reference: String,
    customer_name: String,
    placed_on: NaiveDate,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            reference: row.reference,
            customer_name: row.customer_name,
            placed_on: row.placed_on,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Order row joined with its aggregated total.
#[derive(Debug, sqlx::FromRow)]
struct OrderListRow {
    #[sqlx(flatten)]
    order: OrderRow,
    total: Price,
}

impl From<OrderListRow> for OrderListEntry {
    fn from(row: OrderListRow) -> Self {
        Self {
            order: row.order.into(),
            total: row.total,
        }
    }
}

/// Internal row type for order item queries.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_name: String,
    quantity: i32,
    unit_price: Price,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            order_id: OrderId::new(row.order_id),
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// A line to capture when creating an order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Price,
}

/// Repository for pickup order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders with totals, newest first, optionally filtered by status
    /// and by a search term matched against the reference and customer name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        search: Option<&str>,
    ) -> Result<Vec<OrderListEntry>, RepositoryError> {
        let pattern = search.map(|s| format!("%{s}%"));

        let rows = sqlx::query_as::<_, OrderListRow>(
            r"
            SELECT o.id, o.reference, o.customer_name, o.placed_on, o.status,
                   o.created_at, o.updated_at,
                   COALESCE(SUM(i.unit_price * i.quantity), 0) AS total
            FROM pickup_order o
            LEFT JOIN order_item i ON i.order_id = o.id
            WHERE ($1::order_status IS NULL OR o.status = $1)
              AND ($2::text IS NULL
                   OR o.reference ILIKE $2 OR o.customer_name ILIKE $2)
            GROUP BY o.id
            ORDER BY o.placed_on DESC, o.reference DESC
            ",
        )
        .bind(status)
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an order together with its line items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_with_items(
        &self,
        id: OrderId,
    ) -> Result<Option<(Order, Vec<OrderItem>)>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, reference, customer_name, placed_on, status, created_at, updated_at
            FROM pickup_order
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = row else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_name, quantity, unit_price
            FROM order_item
            WHERE order_id = $1
            ORDER BY id
            ",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(Some((
            order.into(),
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// Update an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            UPDATE pickup_order
            SET status = $1, updated_at = now()
            WHERE id = $2
            RETURNING id, reference, customer_name, placed_on, status, created_at, updated_at
            ",
        )
        .bind(status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Create an order with its line items in one transaction.
    ///
    /// Used by the seeding tool; the console itself only reads and
    /// transitions orders.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the reference already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        reference: &str,
        customer_name: &str,
        placed_on: NaiveDate,
        status: OrderStatus,
        items: &[NewOrderItem],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO pickup_order (reference, customer_name, placed_on, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, reference, customer_name, placed_on, status, created_at, updated_at
            ",
        )
        .bind(reference)
        .bind(customer_name)
        .bind(placed_on)
        .bind(status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("order reference already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO order_item (order_id, product_name, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(row.id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(row.into())
    }

    /// Count orders placed on a given day with a given status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_status_on(
        &self,
        day: NaiveDate,
        status: OrderStatus,
    ) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pickup_order WHERE placed_on = $1 AND status = $2",
        )
        .bind(day)
        .bind(status)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
