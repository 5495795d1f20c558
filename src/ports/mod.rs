//! Ports: trait seams between the application core and its adapters.

mod catalog_reader;
mod expense_repository;
mod live_events;
mod notification_repository;
mod order_repository;
mod scooter_repository;
mod token_verifier;

pub use catalog_reader::CatalogReader;
pub use expense_repository::ExpenseRepository;
pub use live_events::LiveEventEmitter;
pub use notification_repository::NotificationRepository;
pub use order_repository::OrderRepository;
pub use scooter_repository::{BookingRepository, ScooterRepository};
pub use token_verifier::TokenVerifier;
