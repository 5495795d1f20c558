//! Expense route table.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(handlers::add_expense).get(handlers::list_expenses))
}
