//! Postgres-backed scooter fleet and booking storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::booking::{Booking, BookingStats, BookingStatus, Scooter};
use crate::domain::foundation::{BookingId, DomainError, Timestamp, UserId};
use crate::ports::{BookingRepository, ScooterRepository};

use super::db_error;

pub struct PgScooterRepository {
    pool: PgPool,
}

impl PgScooterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ScooterRow {
    scooter_id: String,
    driver_name: String,
    vehicle_number: Option<String>,
    fare_per_km: f64,
    available: bool,
}

impl From<ScooterRow> for Scooter {
    fn from(row: ScooterRow) -> Self {
        Scooter {
            scooter_id: row.scooter_id,
            driver_name: row.driver_name,
            vehicle_number: row.vehicle_number,
            fare_per_km: row.fare_per_km,
            available: row.available,
        }
    }
}

#[async_trait]
impl ScooterRepository for PgScooterRepository {
    async fn list(&self) -> Result<Vec<Scooter>, DomainError> {
        let rows: Vec<ScooterRow> = sqlx::query_as(
            "SELECT scooter_id, driver_name, vehicle_number, fare_per_km, available \
             FROM scooters ORDER BY scooter_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list scooters", e))?;

        Ok(rows.into_iter().map(Scooter::from).collect())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Scooter>, DomainError> {
        let row: Option<ScooterRow> = sqlx::query_as(
            "SELECT scooter_id, driver_name, vehicle_number, fare_per_km, available \
             FROM scooters WHERE scooter_id = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find scooter", e))?;

        Ok(row.map(Scooter::from))
    }

    async fn reserve(&self, code: &str) -> Result<bool, DomainError> {
        // Conditional update: only one concurrent booking can flip the flag.
        let result =
            sqlx::query("UPDATE scooters SET available = FALSE WHERE scooter_id = $1 AND available = TRUE")
                .bind(code)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("reserve scooter", e))?;
        Ok(result.rows_affected() == 1)
    }

    async fn set_available(&self, code: &str, available: bool) -> Result<(), DomainError> {
        sqlx::query("UPDATE scooters SET available = $2 WHERE scooter_id = $1")
            .bind(code)
            .bind(available)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update scooter availability", e))?;
        Ok(())
    }
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    user_id: String,
    scooter_id: String,
    driver: String,
    vehicle_number: String,
    pickup: String,
    destination: String,
    distance_km: f64,
    fare_per_km: f64,
    total_fare: f64,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: BookingId::from_uuid(row.id),
            user: UserId::new(row.user_id)?,
            scooter_id: row.scooter_id,
            driver: row.driver,
            vehicle_number: row.vehicle_number,
            pickup: row.pickup,
            destination: row.destination,
            distance_km: row.distance_km,
            fare_per_km: row.fare_per_km,
            total_fare: row.total_fare,
            status: BookingStatus::parse(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO bookings \
             (id, user_id, scooter_id, driver, vehicle_number, pickup, destination, \
              distance_km, fare_per_km, total_fare, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(booking.id.as_uuid())
        .bind(booking.user.as_str())
        .bind(&booking.scooter_id)
        .bind(&booking.driver)
        .bind(&booking.vehicle_number)
        .bind(&booking.pickup)
        .bind(&booking.destination)
        .bind(booking.distance_km)
        .bind(booking.fare_per_km)
        .bind(booking.total_fare)
        .bind(booking.status.as_str())
        .bind(booking.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert booking", e))?;
        Ok(())
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            "SELECT id, user_id, scooter_id, driver, vehicle_number, pickup, destination, \
             distance_km, fare_per_km, total_fare, status, created_at \
             FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            "SELECT id, user_id, scooter_id, driver, vehicle_number, pickup, destination, \
             distance_km, fare_per_km, total_fare, status, created_at \
             FROM bookings ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list all bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn stats(&self) -> Result<BookingStats, DomainError> {
        let (count, revenue, distance): (i64, f64, f64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(total_fare), 0), COALESCE(SUM(distance_km), 0) \
             FROM bookings",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("booking stats", e))?;

        Ok(BookingStats {
            total_bookings: count as u64,
            total_revenue: revenue,
            total_distance_km: distance,
        })
    }
}
