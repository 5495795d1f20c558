//! Wire types for the notification pull API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::foundation::{NotificationId, Timestamp};
use crate::domain::notification::{Notification, NotificationCategory};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: NotificationId,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    pub read: bool,
    pub icon: String,
    pub created_at: Timestamp,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            category: notification.category,
            title: notification.title,
            message: notification.body,
            related_id: notification.related_entity,
            read: notification.read,
            icon: notification.icon,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
