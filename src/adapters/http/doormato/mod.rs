//! Doormato feature: canteens, menus, and food orders.

pub(crate) mod dto;
mod handlers;
mod routes;

pub use routes::routes;
