//! Notification pull API feature.

mod dto;
mod handlers;
mod routes;

pub use routes::routes;
