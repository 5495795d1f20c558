//! Domain layer: value objects, aggregates, and the live channel protocol.

pub mod booking;
pub mod catalog;
pub mod expense;
pub mod foundation;
pub mod live;
pub mod notification;
pub mod order;
