//! Staff dashboard reads: fleet-wide order and booking views.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingStats};
use crate::domain::foundation::DomainError;
use crate::domain::order::{Order, OrderStats};
use crate::ports::{BookingRepository, OrderRepository};

/// Lists every order across all users, newest first.
pub struct ListAllOrdersHandler {
    orders: Arc<dyn OrderRepository>,
}

impl ListAllOrdersHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self) -> Result<Vec<Order>, DomainError> {
        self.orders.list_all().await
    }
}

/// Order count and revenue totals for the dashboard header.
pub struct OrderStatsHandler {
    orders: Arc<dyn OrderRepository>,
}

impl OrderStatsHandler {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn handle(&self) -> Result<OrderStats, DomainError> {
        self.orders.stats().await
    }
}

/// Lists every booking across all users, newest first.
pub struct ListAllBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListAllBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self) -> Result<Vec<Booking>, DomainError> {
        self.bookings.list_all().await
    }
}

/// Booking count, revenue and distance totals for the dashboard header.
pub struct BookingStatsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl BookingStatsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self) -> Result<BookingStats, DomainError> {
        self.bookings.stats().await
    }
}
