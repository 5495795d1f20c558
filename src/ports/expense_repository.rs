//! Expense repository port.

use async_trait::async_trait;

use crate::domain::expense::Expense;
use crate::domain::foundation::{DomainError, UserId};

/// Durable storage for personal expenses.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Inserts a new expense.
    async fn insert(&self, expense: &Expense) -> Result<(), DomainError>;

    /// Lists a user's expenses, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Expense>, DomainError>;
}
