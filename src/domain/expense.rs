//! Personal expense records.

use super::foundation::{ExpenseId, Timestamp, UserId, ValidationError};

/// One expense entry in a user's personal tracker.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: ExpenseId,
    pub user: UserId,
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    /// When the money was spent (client-supplied, defaults to now).
    pub spent_at: Timestamp,
    pub created_at: Timestamp,
}

impl Expense {
    /// Creates a new expense. Category must be non-empty and the amount
    /// strictly positive.
    pub fn new(
        user: UserId,
        category: impl Into<String>,
        amount: f64,
        note: Option<String>,
        spent_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::invalid_value(
                "amount",
                "must be a positive number",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id: ExpenseId::new(),
            user,
            category,
            amount,
            note,
            spent_at: spent_at.unwrap_or(now),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_requires_category_and_positive_amount() {
        let user = UserId::new("user-1").unwrap();

        assert!(Expense::new(user.clone(), "", 10.0, None, None).is_err());
        assert!(Expense::new(user.clone(), "food", 0.0, None, None).is_err());
        assert!(Expense::new(user.clone(), "food", -5.0, None, None).is_err());
        assert!(Expense::new(user.clone(), "food", f64::NAN, None, None).is_err());
        assert!(Expense::new(user, "food", 120.0, None, None).is_ok());
    }

    #[test]
    fn spent_at_defaults_to_creation_time() {
        let expense = Expense::new(
            UserId::new("user-1").unwrap(),
            "travel",
            45.0,
            Some("auto fare".to_string()),
            None,
        )
        .unwrap();

        assert_eq!(expense.spent_at, expense.created_at);
    }
}
