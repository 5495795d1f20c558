//! Order repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, UserId};
use crate::domain::order::{Order, OrderStats};

/// Durable storage for food orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts a newly placed order.
    async fn insert(&self, order: &Order) -> Result<(), DomainError>;

    /// Loads an order by id, or `None` if absent.
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Persists a status change (status, rejection reason, updated_at).
    async fn update(&self, order: &Order) -> Result<(), DomainError>;

    /// Lists a user's orders, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Order>, DomainError>;

    /// Lists every order across all users, newest first.
    async fn list_all(&self) -> Result<Vec<Order>, DomainError>;

    /// Order count and revenue totals across all users.
    async fn stats(&self) -> Result<OrderStats, DomainError>;
}
