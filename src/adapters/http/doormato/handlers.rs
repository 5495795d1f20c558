//! Doormato endpoint handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::application::handlers::order::{PlaceOrderLine, PlaceOrderRequest};
use crate::domain::catalog::{Canteen, MenuItem};
use crate::domain::foundation::{CanteenId, DomainError, OrderId};
use crate::domain::order::OrderStatus;

use super::dto::{OrderResponse, PlaceOrderBody, UpdateStatusBody};

pub async fn list_canteens(
    State(state): State<AppState>,
) -> Result<Json<Vec<Canteen>>, ApiError> {
    Ok(Json(state.catalog.list_canteens().await?))
}

pub async fn list_menu(
    State(state): State<AppState>,
    Path(canteen): Path<CanteenId>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    Ok(Json(state.catalog.list_menu(&canteen).await?))
}

pub async fn place_order(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<PlaceOrderBody>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let request = PlaceOrderRequest {
        canteen_name: body.canteen_name,
        items: body
            .items
            .into_iter()
            .map(|line| PlaceOrderLine {
                menu_item: line.menu_item,
                quantity: line.quantity,
            })
            .collect(),
    };

    let order = state.place_order.handle(&user, request).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

pub async fn list_orders(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.list_orders.handle(&user.id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

pub async fn update_order_status(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(order): Path<OrderId>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<OrderResponse>, ApiError> {
    let target = OrderStatus::parse(&body.status).map_err(DomainError::from)?;
    let order = state
        .update_order_status
        .handle(&order, target, body.rejection_reason)
        .await?;
    Ok(Json(order.into()))
}
