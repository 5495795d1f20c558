//! Expense endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::expense::AddExpenseRequest;

use super::dto::{AddExpenseBody, ExpenseResponse};

pub async fn add_expense(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<AddExpenseBody>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    let request = AddExpenseRequest {
        category: body.category,
        amount: body.amount,
        note: body.note,
        spent_at: body.spent_at,
    };
    let expense = state.add_expense.handle(&user, request).await?;
    Ok((StatusCode::CREATED, Json(expense.into())))
}

pub async fn list_expenses(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let expenses = state.list_expenses.handle(&user.id).await?;
    Ok(Json(expenses.into_iter().map(ExpenseResponse::from).collect()))
}
