//! Scootigo feature: fleet listing and ride bookings.

mod dto;
mod handlers;
mod routes;

pub use routes::routes;
