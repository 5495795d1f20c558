//! Postgres-backed expense storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::expense::Expense;
use crate::domain::foundation::{DomainError, ExpenseId, Timestamp, UserId};
use crate::ports::ExpenseRepository;

use super::db_error;

pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExpenseRow {
    id: Uuid,
    user_id: String,
    category: String,
    amount: f64,
    note: Option<String>,
    spent_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = DomainError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        Ok(Expense {
            id: ExpenseId::from_uuid(row.id),
            user: UserId::new(row.user_id)?,
            category: row.category,
            amount: row.amount,
            note: row.note,
            spent_at: Timestamp::from_datetime(row.spent_at),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn insert(&self, expense: &Expense) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO expenses (id, user_id, category, amount, note, spent_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(expense.id.as_uuid())
        .bind(expense.user.as_str())
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(&expense.note)
        .bind(expense.spent_at.as_datetime())
        .bind(expense.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert expense", e))?;
        Ok(())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Expense>, DomainError> {
        let rows: Vec<ExpenseRow> = sqlx::query_as(
            "SELECT id, user_id, category, amount, note, spent_at, created_at \
             FROM expenses WHERE user_id = $1 ORDER BY spent_at DESC",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list expenses", e))?;

        rows.into_iter().map(Expense::try_from).collect()
    }
}
