//! Doormato route table.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/canteens", get(handlers::list_canteens))
        .route("/canteens/:id/menu", get(handlers::list_menu))
        .route("/orders", post(handlers::place_order).get(handlers::list_orders))
        .route("/orders/:id/status", patch(handlers::update_order_status))
}
