//! Scooter and booking repository ports.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStats, Scooter};
use crate::domain::foundation::{DomainError, UserId};

/// Durable storage for the scooter fleet.
#[async_trait]
pub trait ScooterRepository: Send + Sync {
    /// Lists the whole fleet.
    async fn list(&self) -> Result<Vec<Scooter>, DomainError>;

    /// Finds a scooter by its human-facing code (e.g. "SCO-7").
    async fn find_by_code(&self, code: &str) -> Result<Option<Scooter>, DomainError>;

    /// Atomically claims an available scooter. Returns `false` when the
    /// scooter was already taken (or never existed), without erroring.
    async fn reserve(&self, code: &str) -> Result<bool, DomainError>;

    /// Persists an availability flip.
    async fn set_available(&self, code: &str, available: bool) -> Result<(), DomainError>;
}

/// Durable storage for ride bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts a new booking.
    async fn insert(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Lists a user's bookings, newest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Booking>, DomainError>;

    /// Lists every booking across all users, newest first.
    async fn list_all(&self) -> Result<Vec<Booking>, DomainError>;

    /// Booking count, fare revenue and distance totals across all users.
    async fn stats(&self) -> Result<BookingStats, DomainError>;
}
