//! Notification pull API use cases.
//!
//! Everything here is scoped to the caller. Touching someone else's
//! notification answers `NOTIFICATION_NOT_FOUND`; whether the record exists
//! under another owner is never revealed.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

/// Default page size when the client doesn't ask for one.
const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on a single page.
const MAX_LIMIT: u32 = 200;

/// Lists the caller's notifications, newest first.
pub struct ListNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        owner: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<Notification>, DomainError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        self.notifications.list_for_owner(owner, limit).await
    }
}

/// Counts the caller's unread notifications (badge count).
pub struct UnreadCountHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl UnreadCountHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, owner: &UserId) -> Result<u64, DomainError> {
        self.notifications.unread_count(owner).await
    }
}

/// Marks one notification read, returning the updated record.
pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(
        &self,
        id: &NotificationId,
        owner: &UserId,
    ) -> Result<Notification, DomainError> {
        self.notifications.mark_read(id, owner).await
    }
}

/// Marks every unread notification of the caller as read.
pub struct MarkAllNotificationsReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkAllNotificationsReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Returns how many records changed. Zero is success, not an error.
    pub async fn handle(&self, owner: &UserId) -> Result<u64, DomainError> {
        self.notifications.mark_all_read(owner).await
    }
}

/// Deletes one of the caller's notifications.
pub struct DeleteNotificationHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl DeleteNotificationHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn handle(&self, id: &NotificationId, owner: &UserId) -> Result<(), DomainError> {
        self.notifications.delete(id, owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::StubNotificationRepo;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::notification::NotificationCategory;

    fn owner(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded() -> Arc<StubNotificationRepo> {
        let repo = Arc::new(StubNotificationRepo::default());
        for (who, title) in [("alice", "first"), ("alice", "second"), ("bob", "other")] {
            repo.insert(&Notification::new(
                owner(who),
                NotificationCategory::System,
                title,
                "body",
                None,
                None,
            ))
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn list_is_newest_first_and_owner_scoped() {
        let repo = seeded().await;
        let handler = ListNotificationsHandler::new(repo);

        let list = handler.handle(&owner("alice"), None).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "second");
        assert_eq!(list[1].title, "first");
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let repo = seeded().await;
        let handler = ListNotificationsHandler::new(repo);

        let list = handler.handle(&owner("alice"), Some(1)).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "second");
    }

    #[tokio::test]
    async fn unread_count_drops_as_records_are_read() {
        let repo = seeded().await;
        let count = UnreadCountHandler::new(repo.clone());
        assert_eq!(count.handle(&owner("alice")).await.unwrap(), 2);

        let id = repo.inserted()[0].id;
        MarkNotificationReadHandler::new(repo.clone())
            .handle(&id, &owner("alice"))
            .await
            .unwrap();

        assert_eq!(count.handle(&owner("alice")).await.unwrap(), 1);
        // Bob's badge is untouched.
        assert_eq!(count.handle(&owner("bob")).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cross_owner_mark_read_answers_not_found() {
        let repo = seeded().await;
        let alice_notification = repo.inserted()[0].id;

        let error = MarkNotificationReadHandler::new(repo)
            .handle(&alice_notification, &owner("bob"))
            .await
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::NotificationNotFound);
    }

    #[tokio::test]
    async fn mark_all_read_is_idempotent() {
        let repo = seeded().await;
        let handler = MarkAllNotificationsReadHandler::new(repo.clone());

        assert_eq!(handler.handle(&owner("alice")).await.unwrap(), 2);
        // Second pass matches nothing and still succeeds.
        assert_eq!(handler.handle(&owner("alice")).await.unwrap(), 0);
        assert_eq!(
            UnreadCountHandler::new(repo).handle(&owner("alice")).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn delete_removes_own_record_but_not_others() {
        let repo = seeded().await;
        let alice_notification = repo.inserted()[0].id;
        let handler = DeleteNotificationHandler::new(repo.clone());

        // Cross-owner delete looks like a missing record.
        let error = handler
            .handle(&alice_notification, &owner("bob"))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::NotificationNotFound);

        handler.handle(&alice_notification, &owner("alice")).await.unwrap();
        let remaining = ListNotificationsHandler::new(repo)
            .handle(&owner("alice"), None)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);

        // Deleting again: the record is gone.
        let error = handler
            .handle(&alice_notification, &owner("alice"))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::NotificationNotFound);
    }
}
