//! Scootigo use cases: booking a ride and listing the fleet.

use std::sync::Arc;

use crate::application::notifier::Notifier;
use crate::application::post_commit::PostCommit;
use crate::domain::booking::{Booking, Scooter};
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, Timestamp, UserId, ValidationError,
};
use crate::domain::live::{LiveEvent, ScooterBookedPayload};
use crate::domain::notification::{Notification, NotificationCategory};
use crate::ports::{BookingRepository, LiveEventEmitter, ScooterRepository};

#[derive(Debug, Clone)]
pub struct BookScooterRequest {
    pub scooter_id: String,
    pub pickup: String,
    pub destination: String,
    pub distance_km: Option<f64>,
}

/// Books an available scooter for the caller.
///
/// The availability flip is the contended write: it is claimed atomically
/// before the booking row is inserted, so two concurrent requests for the
/// same scooter cannot both succeed. The `scooter:booked` broadcast and the
/// rider's notification run post-commit.
pub struct BookScooterHandler {
    scooters: Arc<dyn ScooterRepository>,
    bookings: Arc<dyn BookingRepository>,
    emitter: Arc<dyn LiveEventEmitter>,
    notifier: Arc<Notifier>,
}

impl BookScooterHandler {
    pub fn new(
        scooters: Arc<dyn ScooterRepository>,
        bookings: Arc<dyn BookingRepository>,
        emitter: Arc<dyn LiveEventEmitter>,
        notifier: Arc<Notifier>,
    ) -> Self {
        Self {
            scooters,
            bookings,
            emitter,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        user: &AuthenticatedUser,
        request: BookScooterRequest,
    ) -> Result<Booking, DomainError> {
        let scooter = self
            .scooters
            .find_by_code(&request.scooter_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ScooterNotFound, "Scooter not found")
                    .with_detail("scooterId", request.scooter_id.clone())
            })?;

        let booking = Booking::create(
            user.id.clone(),
            &scooter,
            request.pickup,
            request.destination,
            request.distance_km,
        )?;

        if !self.scooters.reserve(&scooter.scooter_id).await? {
            return Err(
                ValidationError::invalid_value("scooter", "scooter is not available").into(),
            );
        }

        if let Err(error) = self.bookings.insert(&booking).await {
            // Hand the claim back so the scooter isn't stranded.
            if let Err(release) = self.scooters.set_available(&scooter.scooter_id, true).await {
                tracing::warn!(
                    scooter_id = %scooter.scooter_id,
                    error = %release,
                    "failed to release reserved scooter"
                );
            }
            return Err(error);
        }

        let emitter = self.emitter.clone();
        let payload = ScooterBookedPayload {
            scooter_id: booking.scooter_id.clone(),
            available: false,
            booked_by: user.name_or_id().to_string(),
            timestamp: Timestamp::now(),
        };
        let notifier = self.notifier.clone();
        let notification = Notification::new(
            booking.user.clone(),
            NotificationCategory::Booking,
            "Ride Booked",
            format!(
                "{} ({}) is picking you up at {} for ₹{:.2}",
                booking.driver, booking.vehicle_number, booking.pickup, booking.total_fare
            ),
            Some(*booking.id.as_uuid()),
            Some("🛵".to_string()),
        );

        PostCommit::after("book_scooter")
            .step("broadcast_scooter_booked", async move {
                emitter.broadcast(LiveEvent::ScooterBooked(payload)).await;
                Ok(())
            })
            .step("record_notification", async move {
                notifier.notify(notification).await
            })
            .run()
            .await;

        Ok(booking)
    }
}

/// Lists the whole fleet, available or not.
pub struct ListScootersHandler {
    scooters: Arc<dyn ScooterRepository>,
}

impl ListScootersHandler {
    pub fn new(scooters: Arc<dyn ScooterRepository>) -> Self {
        Self { scooters }
    }

    pub async fn handle(&self) -> Result<Vec<Scooter>, DomainError> {
        self.scooters.list().await
    }
}

/// Lists the caller's bookings, newest first.
pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, user: &UserId) -> Result<Vec<Booking>, DomainError> {
        self.bookings.list_for_user(user).await
    }
}
