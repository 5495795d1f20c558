//! Application layer: use case handlers and cross-cutting services.

pub mod handlers;
pub mod notifier;
pub mod post_commit;
