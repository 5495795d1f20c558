//! Wire types for the staff dashboard endpoints.

use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, Timestamp, UserId};

/// A booking as staff see it: includes who booked the ride.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub scooter_id: String,
    pub driver: String,
    pub vehicle_number: String,
    pub pickup: String,
    pub destination: String,
    pub distance_km: f64,
    pub fare_per_km: f64,
    pub total_fare: f64,
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

impl From<Booking> for AdminBookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user,
            scooter_id: booking.scooter_id,
            driver: booking.driver,
            vehicle_number: booking.vehicle_number,
            pickup: booking.pickup,
            destination: booking.destination,
            distance_km: booking.distance_km,
            fare_per_km: booking.fare_per_km,
            total_fare: booking.total_fare,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
