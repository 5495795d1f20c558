//! Scootigo scooters and ride bookings.

use serde::{Deserialize, Serialize};

use super::foundation::{BookingId, StateMachine, Timestamp, UserId, ValidationError};

/// A campus scooter offered for rides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scooter {
    /// Human-facing scooter code, e.g. "SCO-7".
    pub scooter_id: String,
    pub driver_name: String,
    pub vehicle_number: Option<String>,
    pub fare_per_km: f64,
    pub available: bool,
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Ongoing,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Ongoing => "ongoing",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "ongoing" => Ok(BookingStatus::Ongoing),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(ValidationError::invalid_value(
                "status",
                format!("unknown booking status '{}'", other),
            )),
        }
    }
}

impl StateMachine for BookingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (Pending, Ongoing) | (Pending, Cancelled) | (Ongoing, Completed) | (Ongoing, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use BookingStatus::*;
        match self {
            Pending => vec![Ongoing, Cancelled],
            Ongoing => vec![Completed, Cancelled],
            Completed | Cancelled => vec![],
        }
    }
}

/// A ride booked against a scooter. Driver and fare are denormalized at
/// booking time.
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub user: UserId,
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

impl Booking {
    /// Creates a pending booking against an available scooter.
    ///
    /// Distances that are missing or non-positive fall back to one kilometre,
    /// matching how ad hoc campus rides are charged.
    pub fn create(
        user: UserId,
        scooter: &Scooter,
        pickup: impl Into<String>,
        destination: impl Into<String>,
        distance_km: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if !scooter.available {
            return Err(ValidationError::invalid_value(
                "scooter",
                "scooter is not available",
            ));
        }

        let distance_km = distance_km.filter(|d| *d > 0.0).unwrap_or(1.0);
        let total_fare = distance_km * scooter.fare_per_km;

        Ok(Self {
            id: BookingId::new(),
            user,
            scooter_id: scooter.scooter_id.clone(),
            driver: scooter.driver_name.clone(),
            vehicle_number: scooter
                .vehicle_number
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            pickup: pickup.into(),
            destination: destination.into(),
            distance_km,
            fare_per_km: scooter.fare_per_km,
            total_fare,
            status: BookingStatus::Pending,
            created_at: Timestamp::now(),
        })
    }
}

/// Fleet-wide booking totals for the staff dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub total_distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scooter(available: bool) -> Scooter {
        Scooter {
            scooter_id: "SCO-7".to_string(),
            driver_name: "Ravi".to_string(),
            vehicle_number: Some("KA-05-1234".to_string()),
            fare_per_km: 12.0,
            available,
        }
    }

    #[test]
    fn booking_computes_fare_from_distance() {
        let booking = Booking::create(
            UserId::new("user-1").unwrap(),
            &scooter(true),
            "Block B",
            "Library",
            Some(2.5),
        )
        .unwrap();

        assert_eq!(booking.total_fare, 30.0);
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.driver, "Ravi");
    }

    #[test]
    fn missing_distance_defaults_to_one_km() {
        let booking = Booking::create(
            UserId::new("user-1").unwrap(),
            &scooter(true),
            "",
            "",
            None,
        )
        .unwrap();

        assert_eq!(booking.distance_km, 1.0);
        assert_eq!(booking.total_fare, 12.0);
    }

    #[test]
    fn unavailable_scooter_cannot_be_booked() {
        let result = Booking::create(
            UserId::new("user-1").unwrap(),
            &scooter(false),
            "A",
            "B",
            Some(1.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn booking_status_transitions_follow_graph() {
        assert!(BookingStatus::Pending.can_transition_to(&BookingStatus::Ongoing));
        assert!(!BookingStatus::Pending.can_transition_to(&BookingStatus::Completed));
        assert!(BookingStatus::Completed.is_terminal());
    }
}
