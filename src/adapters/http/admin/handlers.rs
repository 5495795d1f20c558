//! Staff dashboard endpoint handlers.

use axum::extract::State;
use axum::Json;

use crate::adapters::http::doormato::dto::OrderResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::domain::booking::BookingStats;
use crate::domain::order::OrderStats;

use super::dto::AdminBookingResponse;

pub async fn list_all_orders(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.list_all_orders.handle().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

pub async fn list_all_bookings(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<AdminBookingResponse>>, ApiError> {
    let bookings = state.list_all_bookings.handle().await?;
    Ok(Json(
        bookings.into_iter().map(AdminBookingResponse::from).collect(),
    ))
}

pub async fn order_stats(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<OrderStats>, ApiError> {
    Ok(Json(state.order_stats.handle().await?))
}

pub async fn booking_stats(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<BookingStats>, ApiError> {
    Ok(Json(state.booking_stats.handle().await?))
}
