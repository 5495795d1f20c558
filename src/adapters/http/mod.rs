//! HTTP adapter: REST surface over the application handlers.

pub mod admin;
pub mod doormato;
pub mod expense;
pub mod middleware;
pub mod notification;
pub mod scootigo;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::adapters::ws::ConnectionRegistry;
use crate::application::handlers::admin::{
    BookingStatsHandler, ListAllBookingsHandler, ListAllOrdersHandler, OrderStatsHandler,
};
use crate::application::handlers::booking::{
    BookScooterHandler, ListBookingsHandler, ListScootersHandler,
};
use crate::application::handlers::expense::{AddExpenseHandler, ListExpensesHandler};
use crate::application::handlers::notification::{
    DeleteNotificationHandler, ListNotificationsHandler, MarkAllNotificationsReadHandler,
    MarkNotificationReadHandler, UnreadCountHandler,
};
use crate::application::handlers::order::{
    ListOrdersHandler, PlaceOrderHandler, UpdateOrderStatusHandler,
};
use crate::application::notifier::Notifier;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode};
use crate::ports::{
    BookingRepository, CatalogReader, ExpenseRepository, LiveEventEmitter,
    NotificationRepository, OrderRepository, ScooterRepository, TokenVerifier,
};

/// Everything the HTTP handlers need, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub registry: Arc<ConnectionRegistry>,
    pub catalog: Arc<dyn CatalogReader>,
    pub place_order: Arc<PlaceOrderHandler>,
    pub update_order_status: Arc<UpdateOrderStatusHandler>,
    pub list_orders: Arc<ListOrdersHandler>,
    pub list_scooters: Arc<ListScootersHandler>,
    pub book_scooter: Arc<BookScooterHandler>,
    pub list_bookings: Arc<ListBookingsHandler>,
    pub add_expense: Arc<AddExpenseHandler>,
    pub list_expenses: Arc<ListExpensesHandler>,
    pub list_notifications: Arc<ListNotificationsHandler>,
    pub unread_count: Arc<UnreadCountHandler>,
    pub mark_notification_read: Arc<MarkNotificationReadHandler>,
    pub mark_all_notifications_read: Arc<MarkAllNotificationsReadHandler>,
    pub delete_notification: Arc<DeleteNotificationHandler>,
    pub list_all_orders: Arc<ListAllOrdersHandler>,
    pub order_stats: Arc<OrderStatsHandler>,
    pub list_all_bookings: Arc<ListAllBookingsHandler>,
    pub booking_stats: Arc<BookingStatsHandler>,
}

impl AppState {
    /// Wires the use case handlers from ports.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        verifier: Arc<dyn TokenVerifier>,
        registry: Arc<ConnectionRegistry>,
        orders: Arc<dyn OrderRepository>,
        catalog: Arc<dyn CatalogReader>,
        scooters: Arc<dyn ScooterRepository>,
        bookings: Arc<dyn BookingRepository>,
        expenses: Arc<dyn ExpenseRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        let emitter: Arc<dyn LiveEventEmitter> = registry.clone();
        let notifier = Arc::new(Notifier::new(notifications.clone(), emitter.clone()));

        Self {
            verifier,
            registry,
            catalog: catalog.clone(),
            place_order: Arc::new(PlaceOrderHandler::new(
                orders.clone(),
                catalog,
                emitter.clone(),
                notifier.clone(),
            )),
            update_order_status: Arc::new(UpdateOrderStatusHandler::new(
                orders.clone(),
                emitter.clone(),
                notifier.clone(),
            )),
            list_orders: Arc::new(ListOrdersHandler::new(orders.clone())),
            list_scooters: Arc::new(ListScootersHandler::new(scooters.clone())),
            book_scooter: Arc::new(BookScooterHandler::new(
                scooters,
                bookings.clone(),
                emitter.clone(),
                notifier.clone(),
            )),
            list_bookings: Arc::new(ListBookingsHandler::new(bookings.clone())),
            add_expense: Arc::new(AddExpenseHandler::new(expenses.clone(), emitter, notifier)),
            list_expenses: Arc::new(ListExpensesHandler::new(expenses)),
            list_notifications: Arc::new(ListNotificationsHandler::new(notifications.clone())),
            unread_count: Arc::new(UnreadCountHandler::new(notifications.clone())),
            mark_notification_read: Arc::new(MarkNotificationReadHandler::new(
                notifications.clone(),
            )),
            mark_all_notifications_read: Arc::new(MarkAllNotificationsReadHandler::new(
                notifications.clone(),
            )),
            delete_notification: Arc::new(DeleteNotificationHandler::new(notifications)),
            list_all_orders: Arc::new(ListAllOrdersHandler::new(orders.clone())),
            order_stats: Arc::new(OrderStatsHandler::new(orders)),
            list_all_bookings: Arc::new(ListAllBookingsHandler::new(bookings.clone())),
            booking_stats: Arc::new(BookingStatsHandler::new(bookings)),
        }
    }
}

/// Builds the REST router. The WebSocket route is merged separately.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/doormato", doormato::routes())
        .nest("/api/scootigo", scootigo::routes())
        .nest("/api/expense", expense::routes())
        .nest("/api/notifications", notification::routes())
        .nest("/api/admin", admin::routes())
        .with_state(state)
}

/// Liveness probe, reporting the number of open live transports.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "connections": state.registry.connection_count().await,
    }))
}

/// HTTP-facing error: a `DomainError` plus its status mapping.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(DomainError::new(ErrorCode::Unauthorized, error.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.code {
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                StatusCode::BAD_REQUEST
            }
            code if code.is_not_found() => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Infrastructure details stay in the logs.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.0.message
        };

        let body = json!({
            "error": {
                "code": self.0.code.to_string(),
                "message": message,
                "details": self.0.details,
            }
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::adapters::auth::MockTokenVerifier;
    use crate::application::handlers::support::{
        StubBookingRepo, StubCatalog, StubExpenseRepo, StubNotificationRepo, StubOrderRepo,
        StubScooterRepo,
    };
    use crate::domain::foundation::UserId;

    fn test_state(registry: Arc<ConnectionRegistry>) -> AppState {
        AppState::assemble(
            Arc::new(MockTokenVerifier::new()),
            registry,
            Arc::new(StubOrderRepo::default()),
            Arc::new(StubCatalog {
                canteens: vec![],
                items: vec![],
            }),
            Arc::new(StubScooterRepo::with_fleet(vec![])),
            Arc::new(StubBookingRepo::default()),
            Arc::new(StubExpenseRepo::default()),
            Arc::new(StubNotificationRepo::default()),
        )
    }

    #[tokio::test]
    async fn health_reports_open_transport_count() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (_a, _rx_a) = registry.register(&UserId::new("alice").unwrap()).await;
        let (_b, _rx_b) = registry.register(&UserId::new("alice").unwrap()).await;

        let app = router(test_state(registry));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["connections"], 2);
    }

    #[tokio::test]
    async fn feature_routes_are_mounted_where_clients_expect() {
        // Unauthenticated requests: a mounted route answers 401, a missing
        // one would answer 404.
        for (method, path) in [
            ("POST", "/api/scootigo/book"),
            ("GET", "/api/scootigo/bookings"),
            ("GET", "/api/expense"),
            ("GET", "/api/admin/orders"),
            ("GET", "/api/admin/bookings"),
            ("GET", "/api/admin/stats/orders"),
            ("GET", "/api/admin/stats/bookings"),
        ] {
            let app = router(test_state(Arc::new(ConnectionRegistry::new())));
            let request = Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();
            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{method} {path}"
            );
        }
    }

    #[test]
    fn not_found_codes_map_to_404() {
        let response =
            ApiError::from(DomainError::new(ErrorCode::OrderNotFound, "Order not found"))
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400_and_auth_to_401() {
        let validation = ApiError::from(DomainError::validation("amount", "must be positive"));
        assert_eq!(validation.into_response().status(), StatusCode::BAD_REQUEST);

        let auth = ApiError::from(AuthError::TokenExpired);
        assert_eq!(auth.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_become_opaque_500s() {
        let response = ApiError::from(DomainError::database("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
