//! Notifier: pairs every durable notification record with a live hint.
//!
//! Mutation handlers never write the notifications table directly; they hand
//! a `Notification` to the notifier, which inserts the row and then pushes a
//! `notification:new` event to the owner's personal channel. The row is the
//! source of truth; the live event is only a refresh hint, so a client that
//! is offline for the push still catches up through the pull API.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::live::{LiveEvent, NotificationNewPayload};
use crate::domain::notification::Notification;
use crate::ports::{LiveEventEmitter, NotificationRepository};

/// Records notifications and pushes the matching live hint.
pub struct Notifier {
    notifications: Arc<dyn NotificationRepository>,
    emitter: Arc<dyn LiveEventEmitter>,
}

impl Notifier {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        emitter: Arc<dyn LiveEventEmitter>,
    ) -> Self {
        Self {
            notifications,
            emitter,
        }
    }

    /// Inserts the record, then emits `notification:new` to the owner.
    ///
    /// The emit only happens once the row is durable. Callers run this as a
    /// post-commit step, so an insert failure is logged there rather than
    /// failing the originating mutation.
    pub async fn notify(&self, notification: Notification) -> Result<(), DomainError> {
        let payload = NotificationNewPayload {
            title: notification.title.clone(),
            message: notification.body.clone(),
            icon: notification.icon.clone(),
        };
        let owner = notification.owner.clone();

        self.notifications.insert(&notification).await?;
        self.emitter
            .send_to_user(&owner, LiveEvent::NotificationNew(payload))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{FailingNotificationRepo, RecordingEmitter, StubNotificationRepo};
    use crate::domain::foundation::UserId;
    use crate::domain::notification::NotificationCategory;

    fn sample(owner: &str) -> Notification {
        Notification::new(
            UserId::new(owner).unwrap(),
            NotificationCategory::System,
            "Welcome",
            "Glad you are here",
            None,
            None,
        )
    }

    #[tokio::test]
    async fn notify_persists_then_emits_to_owner() {
        let repo = Arc::new(StubNotificationRepo::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let notifier = Notifier::new(repo.clone(), emitter.clone());

        notifier.notify(sample("alice")).await.unwrap();

        assert_eq!(repo.inserted().len(), 1);
        let sent = emitter.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.as_str(), "alice");
        assert!(matches!(sent[0].1, LiveEvent::NotificationNew(_)));
    }

    #[tokio::test]
    async fn failed_insert_suppresses_the_live_hint() {
        let repo = Arc::new(FailingNotificationRepo);
        let emitter = Arc::new(RecordingEmitter::default());
        let notifier = Notifier::new(repo, emitter.clone());

        assert!(notifier.notify(sample("alice")).await.is_err());
        assert!(emitter.sent().is_empty());
    }
}
