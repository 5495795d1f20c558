//! PES Buddy backend: campus food orders, scooter rides, and expenses, with
//! real-time per-user event delivery over WebSockets and a durable
//! notification shadow behind it.
//!
//! Layout follows hexagonal lines: `domain` holds the entities and state
//! machines, `ports` the trait seams, `application` the use case handlers,
//! and `adapters` the HTTP/WebSocket/Postgres/JWT implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
