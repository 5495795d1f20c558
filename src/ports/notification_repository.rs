//! Notification repository port.
//!
//! Every query is scoped to the owning user at the storage level: acting on
//! another user's notification is indistinguishable from acting on one that
//! does not exist (`NotificationNotFound`, never a "forbidden" answer).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

/// Durable storage for notification records.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Inserts a new notification record.
    async fn insert(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Lists the owner's notifications, newest first, up to `limit`.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        limit: u32,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Counts the owner's unread notifications.
    async fn unread_count(&self, owner: &UserId) -> Result<u64, DomainError>;

    /// Marks one of the owner's notifications as read, returning the updated
    /// record. `NotificationNotFound` if absent or owned by someone else.
    async fn mark_read(
        &self,
        id: &NotificationId,
        owner: &UserId,
    ) -> Result<Notification, DomainError>;

    /// Flips every unread notification of the owner to read.
    ///
    /// Idempotent: a second call matches nothing and still succeeds.
    /// Returns how many rows changed.
    async fn mark_all_read(&self, owner: &UserId) -> Result<u64, DomainError>;

    /// Deletes one of the owner's notifications. `NotificationNotFound` if
    /// absent or owned by someone else.
    async fn delete(&self, id: &NotificationId, owner: &UserId) -> Result<(), DomainError>;
}
