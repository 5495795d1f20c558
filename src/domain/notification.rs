//! Durable notification records: the persistence shadow of the live channel.
//!
//! A notification is only ever created by server-side mutation handlers. The
//! owning user may mark it read/unread or delete it; nothing else mutates it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::foundation::{NotificationId, Timestamp, UserId, ValidationError};

/// Default display glyph when a mutation handler doesn't pick one.
pub const DEFAULT_ICON: &str = "🔔";

/// Which feature generated a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Order,
    Booking,
    Expense,
    System,
}

impl NotificationCategory {
    /// Stable lowercase name used in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Order => "order",
            NotificationCategory::Booking => "booking",
            NotificationCategory::Expense => "expense",
            NotificationCategory::System => "system",
        }
    }

    /// Parses the stored lowercase name.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "order" => Ok(NotificationCategory::Order),
            "booking" => Ok(NotificationCategory::Booking),
            "expense" => Ok(NotificationCategory::Expense),
            "system" => Ok(NotificationCategory::System),
            other => Err(ValidationError::invalid_value(
                "category",
                format!("unknown notification category '{}'", other),
            )),
        }
    }
}

/// A fact the owning user should eventually see, independent of whether they
/// were online when it happened.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub owner: UserId,
    pub category: NotificationCategory,
    pub title: String,
    pub body: String,
    /// The order/booking/expense that triggered this, if any.
    pub related_entity: Option<Uuid>,
    pub read: bool,
    pub icon: String,
    pub created_at: Timestamp,
}

impl Notification {
    /// Creates a new unread notification.
    pub fn new(
        owner: UserId,
        category: NotificationCategory,
        title: impl Into<String>,
        body: impl Into<String>,
        related_entity: Option<Uuid>,
        icon: Option<String>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            owner,
            category,
            title: title.into(),
            body: body.into(),
            related_entity,
            read: false,
            icon: icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notification_starts_unread_with_default_icon() {
        let n = Notification::new(
            UserId::new("user-1").unwrap(),
            NotificationCategory::Order,
            "Order Placed",
            "Your order has been placed",
            None,
            None,
        );

        assert!(!n.read);
        assert_eq!(n.icon, DEFAULT_ICON);
        assert_eq!(n.category, NotificationCategory::Order);
    }

    #[test]
    fn explicit_icon_overrides_default() {
        let n = Notification::new(
            UserId::new("user-1").unwrap(),
            NotificationCategory::Expense,
            "Expense Added",
            "₹120 on food",
            None,
            Some("💸".to_string()),
        );

        assert_eq!(n.icon, "💸");
    }

    #[test]
    fn category_round_trips_through_storage_name() {
        for category in [
            NotificationCategory::Order,
            NotificationCategory::Booking,
            NotificationCategory::Expense,
            NotificationCategory::System,
        ] {
            assert_eq!(NotificationCategory::parse(category.as_str()).unwrap(), category);
        }
        assert!(NotificationCategory::parse("payment").is_err());
    }
}
