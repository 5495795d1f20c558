//! Staff dashboard route table.

use axum::routing::get;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(handlers::list_all_orders))
        .route("/bookings", get(handlers::list_all_bookings))
        .route("/stats/orders", get(handlers::order_stats))
        .route("/stats/bookings", get(handlers::booking_stats))
}
