//! Doormato order use cases: placing an order and driving its status.

use std::sync::Arc;

use crate::application::notifier::Notifier;
use crate::application::post_commit::PostCommit;
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, MenuItemId, OrderId, UserId, ValidationError,
};
use crate::domain::live::{LiveEvent, OrderNewPayload, OrderStatusPayload};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::domain::order::{Order, OrderItem, OrderStatus};
use crate::ports::{CatalogReader, LiveEventEmitter, OrderRepository};

/// One requested line of a new order; price and name come from the catalog.
#[derive(Debug, Clone)]
pub struct PlaceOrderLine {
    pub menu_item: MenuItemId,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub canteen_name: String,
    pub items: Vec<PlaceOrderLine>,
}

/// Places a new order: prices the lines from the catalog, persists the
/// pending order, broadcasts `order:new` and records an "Order Placed"
/// notification for the buyer.
pub struct PlaceOrderHandler {
    orders: Arc<dyn OrderRepository>,
    catalog: Arc<dyn CatalogReader>,
    emitter: Arc<dyn LiveEventEmitter>,
    notifier: Arc<Notifier>,
}

impl PlaceOrderHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        catalog: Arc<dyn CatalogReader>,
        emitter: Arc<dyn LiveEventEmitter>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            orders,
            catalog,
            emitter,
            notifier,
        }
    }

    /// Prices the requested lines against the catalog. Lines naming unknown
    /// or unavailable items are skipped rather than failing the order, and a
    /// non-positive quantity is coerced to one; the order fails only when no
    /// priceable line remains.
    pub async fn handle(
        &self,
        user: &AuthenticatedUser,
        request: PlaceOrderRequest,
    ) -> Result<Order, DomainError> {
        let mut lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let Some(item) = self.catalog.find_item(&line.menu_item).await? else {
                tracing::debug!(menu_item = %line.menu_item, "skipping unknown menu item");
                continue;
            };
            if !item.available {
                tracing::debug!(menu_item = %item.name, "skipping unavailable menu item");
                continue;
            }
            lines.push(OrderItem {
                menu_item: item.id,
                name: item.name,
                price: item.price,
                quantity: line.quantity.max(1),
                canteen: Some(item.canteen),
            });
        }

        if lines.is_empty() {
            return Err(ValidationError::invalid_value("items", "no valid items in order").into());
        }

        let order = Order::place(user.id.clone(), request.canteen_name, lines)?;
        self.orders.insert(&order).await?;

        let emitter = self.emitter.clone();
        let payload = OrderNewPayload {
            order_id: order.id,
            user_id: order.user.clone(),
            user_name: user.name_or_id().to_string(),
            canteen_name: order.canteen_name.clone(),
            total: order.total,
            item_count: order.item_count(),
            timestamp: order.created_at,
        };
        let notifier = self.notifier.clone();
        let notification = Notification::new(
            order.user.clone(),
            NotificationCategory::Order,
            "Order Placed",
            format!(
                "Your order at {} for ₹{:.2} has been placed",
                order.canteen_name, order.total
            ),
            Some(*order.id.as_uuid()),
            Some("🍔".to_string()),
        );

        PostCommit::after("place_order")
            .step("broadcast_order_new", async move {
                emitter.broadcast(LiveEvent::OrderNew(payload)).await;
                Ok(())
            })
            .step("record_notification", async move {
                notifier.notify(notification).await
            })
            .run()
            .await;

        Ok(order)
    }
}

/// Moves an order through its lifecycle on behalf of canteen staff.
///
/// After the durable update, the new status is broadcast, pushed to the
/// buyer's personal channel, and recorded as a notification. A rejection's
/// reason is echoed into the notification body.
pub struct UpdateOrderStatusHandler {
    orders: Arc<dyn OrderRepository>,
    emitter: Arc<dyn LiveEventEmitter>,
    notifier: Arc<Notifier>,
}

impl UpdateOrderStatusHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        emitter: Arc<dyn LiveEventEmitter>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            orders,
            emitter,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        order_id: &OrderId,
        target: OrderStatus,
        rejection_reason: Option<String>,
    ) -> Result<Order, DomainError> {
        let mut order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::OrderNotFound, "Order not found"))?;

        order.transition(target, rejection_reason)?;
        self.orders.update(&order).await?;

        let payload = OrderStatusPayload {
            order_id: order.id,
            user_id: order.user.clone(),
            status: order.status,
            rejection_reason: order.rejection_reason.clone(),
            timestamp: order.updated_at,
        };
        let broadcast_emitter = self.emitter.clone();
        let broadcast_payload = payload.clone();
        let targeted_emitter = self.emitter.clone();
        let owner = order.user.clone();
        let notifier = self.notifier.clone();
        let notification = status_notification(&order);

        PostCommit::after("update_order_status")
            .step("broadcast_order_status", async move {
                broadcast_emitter
                    .broadcast(LiveEvent::OrderStatus(broadcast_payload))
                    .await;
                Ok(())
            })
            .step("send_order_status_to_owner", async move {
                targeted_emitter
                    .send_to_user(&owner, LiveEvent::OrderStatus(payload))
                    .await;
                Ok(())
            })
            .step("record_notification", async move {
                notifier.notify(notification).await
            })
            .run()
            .await;

        Ok(order)
    }
}

/// Builds the buyer-facing notification for an order's new status.
fn status_notification(order: &Order) -> Notification {
    let (title, body, icon) = match order.status {
        OrderStatus::Accepted => (
            "Order Accepted",
            format!("{} has accepted your order", order.canteen_name),
            "✅",
        ),
        OrderStatus::Rejected => {
            let reason = order.rejection_reason.as_deref().unwrap_or("no reason given");
            (
                "Order Rejected",
                format!("{} rejected your order: {}", order.canteen_name, reason),
                "❌",
            )
        }
        OrderStatus::Preparing => (
            "Order Update",
            format!("{} is preparing your order", order.canteen_name),
            "👨‍🍳",
        ),
        OrderStatus::Completed => (
            "Order Ready",
            format!("Your order from {} is ready for pickup", order.canteen_name),
            "🎉",
        ),
        OrderStatus::Pending | OrderStatus::Cancelled => (
            "Order Cancelled",
            format!("Your order at {} has been cancelled", order.canteen_name),
            "🚫",
        ),
    };

    Notification::new(
        order.user.clone(),
        NotificationCategory::Order,
        title,
        body,
        Some(*order.id.as_uuid()),
        Some(icon.to_string()),
    )
}

/// Lists the caller's own orders, newest first.
pub struct ListOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl ListOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self, user: &UserId) -> Result<Vec<Order>, DomainError> {
        self.orders.list_for_user(user).await
    }
}
