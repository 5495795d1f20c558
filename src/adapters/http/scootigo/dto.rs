//! Wire types for the Scootigo endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, Timestamp};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookScooterBody {
    pub scooter_id: String,
    pub pickup: String,
    pub destination: String,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
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

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
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
