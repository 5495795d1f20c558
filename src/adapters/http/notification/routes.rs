//! Notification route table.

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list))
        .route("/unread-count", get(handlers::unread_count))
        .route("/mark-all-read", patch(handlers::mark_all_read))
        .route("/:id/read", patch(handlers::mark_read))
        .route("/:id", delete(handlers::delete))
}
