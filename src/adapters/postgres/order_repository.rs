//! Postgres-backed order storage.
//!
//! Order lines are denormalized JSONB: they are priced snapshots, never
//! joined against the live menu.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, Timestamp, UserId};
use crate::domain::order::{Order, OrderItem, OrderStats, OrderStatus};
use crate::ports::OrderRepository;

use super::db_error;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: String,
    canteen_name: String,
    items: JsonValue,
    total: f64,
    status: String,
    rejection_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<OrderItem> = serde_json::from_value(row.items).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, "Stored order items are malformed")
                .with_detail("cause", e.to_string())
        })?;
        Ok(Order {
            id: OrderId::from_uuid(row.id),
            user: UserId::new(row.user_id)?,
            canteen_name: row.canteen_name,
            items,
            total: row.total,
            status: OrderStatus::parse(&row.status)?,
            rejection_reason: row.rejection_reason,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const COLUMNS: &str =
    "id, user_id, canteen_name, items, total, status, rejection_reason, created_at, updated_at";

fn items_json(order: &Order) -> Result<JsonValue, DomainError> {
    serde_json::to_value(&order.items).map_err(|e| {
        DomainError::new(ErrorCode::InternalError, "Order items failed to serialize")
            .with_detail("cause", e.to_string())
    })
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO orders \
             (id, user_id, canteen_name, items, total, status, rejection_reason, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(order.id.as_uuid())
        .bind(order.user.as_str())
        .bind(&order.canteen_name)
        .bind(items_json(order)?)
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(&order.rejection_reason)
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert order", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM orders WHERE id = $1"))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find order", e))?;

        row.map(Order::try_from).transpose()
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            "UPDATE orders SET status = $2, rejection_reason = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(order.id.as_uuid())
        .bind(order.status.as_str())
        .bind(&order.rejection_reason)
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update order", e))?;
        Ok(())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list orders", e))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> =
            sqlx::query_as(&format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list all orders", e))?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn stats(&self) -> Result<OrderStats, DomainError> {
        let (count, revenue): (i64, f64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total), 0) FROM orders")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("order stats", e))?;

        Ok(OrderStats {
            total_orders: count as u64,
            total_revenue: revenue,
        })
    }
}
