//! Expense tracker feature.

mod dto;
mod handlers;
mod routes;

pub use routes::routes;
