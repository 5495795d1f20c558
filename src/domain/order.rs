//! Doormato order aggregate and its status state machine.

use serde::{Deserialize, Serialize};

use super::foundation::{
    CanteenId, MenuItemId, OrderId, StateMachine, Timestamp, UserId, ValidationError,
};

/// Lifecycle status of a food order.
///
/// `pending → {accepted, rejected}`, `accepted → preparing → completed`,
/// and any non-terminal state may be cancelled. `rejected`, `completed`
/// and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Rejected,
    Preparing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Stable lowercase name used in storage and wire payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Accepted => "accepted",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the stored lowercase name.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "accepted" => Ok(OrderStatus::Accepted),
            "rejected" => Ok(OrderStatus::Rejected),
            "preparing" => Ok(OrderStatus::Preparing),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(ValidationError::invalid_value(
                "status",
                format!("unknown order status '{}'", other),
            )),
        }
    }
}

impl StateMachine for OrderStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OrderStatus::*;
        matches!(
            (self, target),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Accepted, Preparing)
                | (Accepted, Cancelled)
                | (Preparing, Completed)
                | (Preparing, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderStatus::*;
        match self {
            Pending => vec![Accepted, Rejected, Cancelled],
            Accepted => vec![Preparing, Cancelled],
            Preparing => vec![Completed, Cancelled],
            Rejected | Completed | Cancelled => vec![],
        }
    }
}

/// One priced line of an order, denormalized at order time so later menu
/// edits don't rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item: MenuItemId,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub canteen: Option<CanteenId>,
}

impl OrderItem {
    /// Line total for this item.
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A food order placed by a user.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub user: UserId,
    pub canteen_name: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub status: OrderStatus,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Creates a new pending order from priced items.
    ///
    /// The item list must be non-empty; the total is derived from the lines.
    pub fn place(
        user: UserId,
        canteen_name: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::empty_field("items"));
        }
        let total = items.iter().map(OrderItem::line_total).sum();
        let now = Timestamp::now();
        Ok(Self {
            id: OrderId::new(),
            user,
            canteen_name: canteen_name.into(),
            items,
            total,
            status: OrderStatus::Pending,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a status transition, enforcing the state machine and the
    /// rejection-reason rule. No field changes on error.
    pub fn transition(
        &mut self,
        target: OrderStatus,
        rejection_reason: Option<String>,
    ) -> Result<(), ValidationError> {
        let next = self.status.transition_to(target)?;

        if next == OrderStatus::Rejected {
            let reason = rejection_reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .ok_or_else(|| ValidationError::empty_field("rejection_reason"))?
                .to_string();
            self.rejection_reason = Some(reason);
        }

        self.status = next;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Number of item lines in this order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Fleet-wide order totals for the staff dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem {
            menu_item: MenuItemId::new(),
            name: name.to_string(),
            price,
            quantity,
            canteen: None,
        }
    }

    fn pending_order() -> Order {
        Order::place(
            UserId::new("user-1").unwrap(),
            "Main Canteen",
            vec![item("Masala Dosa", 60.0, 2), item("Filter Coffee", 25.0, 1)],
        )
        .unwrap()
    }

    #[test]
    fn place_computes_total_from_lines() {
        let order = pending_order();
        assert_eq!(order.total, 145.0);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn place_rejects_empty_item_list() {
        let result = Order::place(UserId::new("user-1").unwrap(), "Main Canteen", vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn happy_path_reaches_completed() {
        let mut order = pending_order();
        order.transition(OrderStatus::Accepted, None).unwrap();
        order.transition(OrderStatus::Preparing, None).unwrap();
        order.transition(OrderStatus::Completed, None).unwrap();
        assert_eq!(order.status, OrderStatus::Completed);
        assert!(order.status.is_terminal());
    }

    #[test]
    fn pending_cannot_jump_to_completed() {
        let mut order = pending_order();
        let result = order.transition(OrderStatus::Completed, None);
        assert!(result.is_err());
        // Stored status unchanged on a rejected transition.
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn rejection_requires_a_reason() {
        let mut order = pending_order();
        assert!(order.transition(OrderStatus::Rejected, None).is_err());
        assert!(order
            .transition(OrderStatus::Rejected, Some("   ".to_string()))
            .is_err());
        assert_eq!(order.status, OrderStatus::Pending);

        order
            .transition(OrderStatus::Rejected, Some("Item out of stock".to_string()))
            .unwrap();
        assert_eq!(order.status, OrderStatus::Rejected);
        assert_eq!(order.rejection_reason.as_deref(), Some("Item out of stock"));
    }

    #[test]
    fn any_non_terminal_state_can_cancel() {
        for setup in [
            vec![],
            vec![OrderStatus::Accepted],
            vec![OrderStatus::Accepted, OrderStatus::Preparing],
        ] {
            let mut order = pending_order();
            for step in setup {
                order.transition(step, None).unwrap();
            }
            order.transition(OrderStatus::Cancelled, None).unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for terminal in [OrderStatus::Rejected, OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
        }
    }

    #[test]
    fn status_round_trips_through_storage_name() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Rejected,
            OrderStatus::Preparing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::parse("placed").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            r#""preparing""#
        );
    }
}
