//! Wire types for the Doormato endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MenuItemId, OrderId, Timestamp, UserId};
use crate::domain::order::{Order, OrderItem, OrderStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody {
    pub canteen_name: String,
    pub items: Vec<OrderLineBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineBody {
    pub menu_item: MenuItemId,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    pub status: String,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub canteen_name: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user,
            canteen_name: order.canteen_name,
            items: order.items,
            total: order.total,
            status: order.status,
            rejection_reason: order.rejection_reason,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
