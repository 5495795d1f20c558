//! Live channel protocol: routing keys and the events pushed to clients.
//!
//! A `LiveEvent` is transient and never persisted. Every user-targeted event
//! is a hint to refresh; the durable fact lives in the notifications table.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

use super::foundation::{ExpenseId, OrderId, Timestamp, UserId};
use super::order::OrderStatus;

/// Routing scope for a live event.
///
/// Constructed through `ChannelKey::global()` / `ChannelKey::user(..)` so the
/// `user:<id>` convention lives in exactly one place instead of being
/// string-concatenated at call sites.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelKey {
    /// Every currently connected transport.
    Global,
    /// Only the transports belonging to one identity.
    User(UserId),
}

impl ChannelKey {
    /// The global broadcast channel.
    pub fn global() -> Self {
        ChannelKey::Global
    }

    /// The personal channel for one identity.
    pub fn user(id: &UserId) -> Self {
        ChannelKey::User(id.clone())
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKey::Global => write!(f, "global"),
            ChannelKey::User(id) => write!(f, "user:{}", id),
        }
    }
}

/// Payload for `order:new` (broadcast to operator dashboards).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderNewPayload {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub user_name: String,
    pub canteen_name: String,
    pub total: f64,
    pub item_count: usize,
    pub timestamp: Timestamp,
}

/// Payload for `order:status` (broadcast and sent to the order's owner).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusPayload {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub timestamp: Timestamp,
}

/// Payload for `scooter:booked` (broadcast availability flip).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScooterBookedPayload {
    pub scooter_id: String,
    pub available: bool,
    pub booked_by: String,
    pub timestamp: Timestamp,
}

/// Payload for `expense:added` (personal channel only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAddedPayload {
    pub expense_id: ExpenseId,
    pub category: String,
    pub amount: f64,
    pub timestamp: Timestamp,
}

/// Payload for `notification:new` (personal channel only).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationNewPayload {
    pub title: String,
    pub message: String,
    pub icon: String,
}

/// A transient event pushed over the live channel.
#[derive(Debug, Clone)]
pub enum LiveEvent {
    /// Presence gauge: number of currently open transports.
    UsersCount(usize),
    OrderNew(OrderNewPayload),
    OrderStatus(OrderStatusPayload),
    ScooterBooked(ScooterBookedPayload),
    ExpenseAdded(ExpenseAddedPayload),
    NotificationNew(NotificationNewPayload),
}

impl LiveEvent {
    /// Wire name tag for this event.
    pub fn name(&self) -> &'static str {
        match self {
            LiveEvent::UsersCount(_) => "users:count",
            LiveEvent::OrderNew(_) => "order:new",
            LiveEvent::OrderStatus(_) => "order:status",
            LiveEvent::ScooterBooked(_) => "scooter:booked",
            LiveEvent::ExpenseAdded(_) => "expense:added",
            LiveEvent::NotificationNew(_) => "notification:new",
        }
    }

    /// Serializes to the `{"event": .., "data": ..}` frame sent to clients.
    pub fn to_frame(&self) -> JsonValue {
        let data = match self {
            LiveEvent::UsersCount(count) => serde_json::json!(count),
            LiveEvent::OrderNew(p) => serde_json::to_value(p).unwrap_or(JsonValue::Null),
            LiveEvent::OrderStatus(p) => serde_json::to_value(p).unwrap_or(JsonValue::Null),
            LiveEvent::ScooterBooked(p) => serde_json::to_value(p).unwrap_or(JsonValue::Null),
            LiveEvent::ExpenseAdded(p) => serde_json::to_value(p).unwrap_or(JsonValue::Null),
            LiveEvent::NotificationNew(p) => serde_json::to_value(p).unwrap_or(JsonValue::Null),
        };
        serde_json::json!({ "event": self.name(), "data": data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn channel_key_user_renders_convention() {
        let key = ChannelKey::user(&user("abc"));
        assert_eq!(key.to_string(), "user:abc");
    }

    #[test]
    fn channel_key_global_renders() {
        assert_eq!(ChannelKey::global().to_string(), "global");
    }

    #[test]
    fn distinct_users_get_distinct_keys() {
        assert_ne!(ChannelKey::user(&user("a")), ChannelKey::user(&user("b")));
        assert_eq!(ChannelKey::user(&user("a")), ChannelKey::user(&user("a")));
    }

    #[test]
    fn users_count_frame_carries_bare_number() {
        let frame = LiveEvent::UsersCount(3).to_frame();
        assert_eq!(frame["event"], "users:count");
        assert_eq!(frame["data"], 3);
    }

    #[test]
    fn order_status_frame_includes_rejection_reason_when_present() {
        let event = LiveEvent::OrderStatus(OrderStatusPayload {
            order_id: OrderId::new(),
            user_id: user("u-1"),
            status: OrderStatus::Rejected,
            rejection_reason: Some("Item out of stock".to_string()),
            timestamp: Timestamp::now(),
        });

        let frame = event.to_frame();
        assert_eq!(frame["event"], "order:status");
        assert_eq!(frame["data"]["status"], "rejected");
        assert_eq!(frame["data"]["rejectionReason"], "Item out of stock");
    }

    #[test]
    fn order_status_frame_omits_absent_rejection_reason() {
        let event = LiveEvent::OrderStatus(OrderStatusPayload {
            order_id: OrderId::new(),
            user_id: user("u-1"),
            status: OrderStatus::Accepted,
            rejection_reason: None,
            timestamp: Timestamp::now(),
        });

        let frame = event.to_frame();
        assert!(frame["data"].get("rejectionReason").is_none());
    }

    #[test]
    fn notification_new_frame_uses_camel_case_fields() {
        let event = LiveEvent::NotificationNew(NotificationNewPayload {
            title: "Order Accepted".to_string(),
            message: "Your order is being prepared".to_string(),
            icon: "🍔".to_string(),
        });

        let frame = event.to_frame();
        assert_eq!(frame["event"], "notification:new");
        assert_eq!(frame["data"]["title"], "Order Accepted");
        assert_eq!(frame["data"]["icon"], "🍔");
    }
}
