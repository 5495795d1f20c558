//! Expense tracker use cases.

use std::sync::Arc;

use crate::application::notifier::Notifier;
use crate::application::post_commit::PostCommit;
use crate::domain::expense::Expense;
use crate::domain::foundation::{AuthenticatedUser, DomainError, Timestamp, UserId};
use crate::domain::live::{ExpenseAddedPayload, LiveEvent};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::ports::{ExpenseRepository, LiveEventEmitter};

#[derive(Debug, Clone)]
pub struct AddExpenseRequest {
    pub category: String,
    pub amount: f64,
    pub note: Option<String>,
    pub spent_at: Option<Timestamp>,
}

/// Records a personal expense.
///
/// Expenses are private, so the live event goes only to the owner's personal
/// channel, never the global one.
pub struct AddExpenseHandler {
    expenses: Arc<dyn ExpenseRepository>,
    emitter: Arc<dyn LiveEventEmitter>,
    notifier: Arc<Notifier>,
}

impl AddExpenseHandler {
    pub fn new(
        expenses: Arc<dyn ExpenseRepository>,
        emitter: Arc<dyn LiveEventEmitter>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            expenses,
            emitter,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        user: &AuthenticatedUser,
        request: AddExpenseRequest,
    ) -> Result<Expense, DomainError> {
        let expense = Expense::new(
            user.id.clone(),
            request.category,
            request.amount,
            request.note,
            request.spent_at,
        )?;
        self.expenses.insert(&expense).await?;

        let emitter = self.emitter.clone();
        let owner = expense.user.clone();
        let payload = ExpenseAddedPayload {
            expense_id: expense.id,
            category: expense.category.clone(),
            amount: expense.amount,
            timestamp: expense.created_at,
        };
        let notifier = self.notifier.clone();
        let notification = Notification::new(
            expense.user.clone(),
            NotificationCategory::Expense,
            "Expense Added",
            format!("₹{:.2} on {}", expense.amount, expense.category),
            Some(*expense.id.as_uuid()),
            Some("💸".to_string()),
        );

        PostCommit::after("add_expense")
            .step("send_expense_added_to_owner", async move {
                emitter
                    .send_to_user(&owner, LiveEvent::ExpenseAdded(payload))
                    .await;
                Ok(())
            })
            .step("record_notification", async move {
                notifier.notify(notification).await
            })
            .run()
            .await;

        Ok(expense)
    }
}

/// Lists the caller's expenses, newest first.
pub struct ListExpensesHandler {
    expenses: Arc<dyn ExpenseRepository>,
}

impl ListExpensesHandler {
    pub fn new(expenses: Arc<dyn ExpenseRepository>) -> Self {
        Self { expenses }
    }

    pub async fn handle(&self, user: &UserId) -> Result<Vec<Expense>, DomainError> {
        self.expenses.list_for_user(user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::support::{
        RecordingEmitter, StubExpenseRepo, StubNotificationRepo,
    };

    fn owner() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-1").unwrap(), None)
    }

    fn handler(
        expenses: Arc<StubExpenseRepo>,
        emitter: Arc<RecordingEmitter>,
        notifications: Arc<StubNotificationRepo>,
    ) -> AddExpenseHandler {
        let notifier = Arc::new(Notifier::new(notifications, emitter.clone()));
        AddExpenseHandler::new(expenses, emitter, notifier)
    }

    #[tokio::test]
    async fn added_expense_stays_on_the_personal_channel() {
        let expenses = Arc::new(StubExpenseRepo::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let notifications = Arc::new(StubNotificationRepo::default());
        let handler = handler(expenses.clone(), emitter.clone(), notifications.clone());

        let expense = handler
            .handle(
                &owner(),
                AddExpenseRequest {
                    category: "food".to_string(),
                    amount: 120.0,
                    note: Some("lunch".to_string()),
                    spent_at: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(expense.amount, 120.0);
        assert_eq!(expenses.inserted().len(), 1);
        // Nothing on the global channel.
        assert!(emitter.broadcasts().is_empty());

        let targeted = emitter.sent();
        assert_eq!(targeted.len(), 2);
        assert!(targeted.iter().all(|(user, _)| user.as_str() == "user-1"));
        assert!(matches!(targeted[0].1, LiveEvent::ExpenseAdded(_)));
        assert!(matches!(targeted[1].1, LiveEvent::NotificationNew(_)));

        let recorded = notifications.inserted();
        assert_eq!(recorded[0].title, "Expense Added");
        assert!(recorded[0].body.contains("food"));
    }

    #[tokio::test]
    async fn invalid_expense_writes_and_emits_nothing() {
        let expenses = Arc::new(StubExpenseRepo::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let handler = handler(
            expenses.clone(),
            emitter.clone(),
            Arc::new(StubNotificationRepo::default()),
        );

        let result = handler
            .handle(
                &owner(),
                AddExpenseRequest {
                    category: "food".to_string(),
                    amount: -5.0,
                    note: None,
                    spent_at: None,
                },
            )
            .await;

        assert!(result.is_err());
        assert!(expenses.inserted().is_empty());
        assert!(emitter.sent().is_empty());
    }

    #[tokio::test]
    async fn list_expenses_is_scoped_to_caller() {
        let expenses = Arc::new(StubExpenseRepo::default());
        let emitter = Arc::new(RecordingEmitter::default());
        let add = handler(
            expenses.clone(),
            emitter,
            Arc::new(StubNotificationRepo::default()),
        );
        add.handle(
            &owner(),
            AddExpenseRequest {
                category: "travel".to_string(),
                amount: 45.0,
                note: None,
                spent_at: None,
            },
        )
        .await
        .unwrap();

        let list = ListExpensesHandler::new(expenses);
        assert_eq!(list.handle(&UserId::new("user-1").unwrap()).await.unwrap().len(), 1);
        assert!(list.handle(&UserId::new("user-2").unwrap()).await.unwrap().is_empty());
    }
}
