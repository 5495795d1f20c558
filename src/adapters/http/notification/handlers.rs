//! Notification pull API handlers.
//!
//! Every route requires authentication; the caller can only ever see or
//! touch their own records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::{ApiError, AppState};
use crate::domain::foundation::NotificationId;

use super::dto::{ListParams, MarkAllReadResponse, NotificationResponse, UnreadCountResponse};

pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
    let notifications = state.list_notifications.handle(&user.id, params.limit).await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(NotificationResponse::from)
            .collect(),
    ))
}

pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<UnreadCountResponse>, ApiError> {
    let count = state.unread_count.handle(&user.id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<NotificationId>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let notification = state.mark_notification_read.handle(&id, &user.id).await?;
    Ok(Json(notification.into()))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<MarkAllReadResponse>, ApiError> {
    let updated = state.mark_all_notifications_read.handle(&user.id).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<NotificationId>,
) -> Result<StatusCode, ApiError> {
    state.delete_notification.handle(&id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
