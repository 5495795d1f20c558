//! Postgres-backed notification storage.
//!
//! Every statement carries `owner_id = $n` in its WHERE clause, so ownership
//! is enforced by the database itself. A row that exists under another owner
//! and a row that does not exist produce the same `NOTIFICATION_NOT_FOUND`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, NotificationId, Timestamp, UserId,
};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::ports::NotificationRepository;

use super::db_error;

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id: Uuid,
    owner_id: String,
    category: String,
    title: String,
    body: String,
    related_entity: Option<Uuid>,
    read: bool,
    icon: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: NotificationId::from_uuid(row.id),
            owner: UserId::new(row.owner_id)?,
            category: NotificationCategory::parse(&row.category)?,
            title: row.title,
            body: row.body,
            related_entity: row.related_entity,
            read: row.read,
            icon: row.icon,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const COLUMNS: &str = "id, owner_id, category, title, body, related_entity, read, icon, created_at";

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::NotificationNotFound, "Notification not found")
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO notifications \
             (id, owner_id, category, title, body, related_entity, read, icon, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(notification.id.as_uuid())
        .bind(notification.owner.as_str())
        .bind(notification.category.as_str())
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.related_entity)
        .bind(notification.read)
        .bind(&notification.icon)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert notification", e))?;
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE owner_id = $1 ORDER BY created_at DESC LIMIT $2"
        ))
        .bind(owner.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list notifications", e))?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn unread_count(&self, owner: &UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE owner_id = $1 AND read = FALSE",
        )
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("count unread notifications", e))?;

        Ok(count as u64)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        owner: &UserId,
    ) -> Result<Notification, DomainError> {
        let row: Option<NotificationRow> = sqlx::query_as(&format!(
            "UPDATE notifications SET read = TRUE \
             WHERE id = $1 AND owner_id = $2 RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("mark notification read", e))?;

        row.map(Notification::try_from).transpose()?.ok_or_else(not_found)
    }

    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE owner_id = $1 AND read = FALSE",
        )
        .bind(owner.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("mark all notifications read", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &NotificationId, owner: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND owner_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete notification", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
