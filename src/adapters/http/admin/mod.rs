//! Admin feature: fleet-wide order and booking views for canteen staff.

mod dto;
mod handlers;
mod routes;

pub use routes::routes;
