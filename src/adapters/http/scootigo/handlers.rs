//! Scootigo endpoint handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::booking::BookScooterRequest;
use crate::domain::booking::Scooter;

use super::dto::{BookScooterBody, BookingResponse};

pub async fn list_scooters(State(state): State<AppState>) -> Result<Json<Vec<Scooter>>, ApiError> {
    Ok(Json(state.list_scooters.handle().await?))
}

pub async fn book_scooter(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<BookScooterBody>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let request = BookScooterRequest {
        scooter_id: body.scooter_id,
        pickup: body.pickup,
        destination: body.destination,
        distance_km: body.distance_km,
    };
    let booking = state.book_scooter.handle(&user, request).await?;
    Ok((StatusCode::CREATED, Json(booking.into())))
}

pub async fn list_bookings(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let bookings = state.list_bookings.handle(&user.id).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}
