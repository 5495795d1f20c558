//! PostgreSQL repository adapters.
//!
//! All queries run at runtime through the shared `PgPool`; enums and value
//! objects are stored as their stable string forms and re-parsed on the way
//! out through `TryFrom<Row>` conversions.

mod catalog_reader;
mod expense_repository;
mod notification_repository;
mod order_repository;
mod scooter_repository;

pub use catalog_reader::PgCatalogReader;
pub use expense_repository::PgExpenseRepository;
pub use notification_repository::PgNotificationRepository;
pub use order_repository::PgOrderRepository;
pub use scooter_repository::{PgBookingRepository, PgScooterRepository};

use crate::domain::foundation::DomainError;

/// Logs the underlying failure and folds it into a `DATABASE_ERROR`.
pub(crate) fn db_error(context: &'static str, error: sqlx::Error) -> DomainError {
    tracing::error!(context, %error, "database query failed");
    DomainError::database(context)
}
