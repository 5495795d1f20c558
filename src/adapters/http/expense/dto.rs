//! Wire types for the expense endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::expense::Expense;
use crate::domain::foundation::{ExpenseId, Timestamp};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExpenseBody {
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    pub spent_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: ExpenseId,
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub spent_at: Timestamp,
    pub created_at: Timestamp,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            category: expense.category,
            amount: expense.amount,
            note: expense.note,
            spent_at: expense.spent_at,
            created_at: expense.created_at,
        }
    }
}
