//! Scootigo route table.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scooters", get(handlers::list_scooters))
        .route("/book", post(handlers::book_scooter))
        .route("/bookings", get(handlers::list_bookings))
}
