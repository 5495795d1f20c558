//! Live channel adapter: connection registry and WebSocket endpoint.

mod handler;
mod registry;

pub use handler::{routes, LiveState};
pub use registry::ConnectionRegistry;
