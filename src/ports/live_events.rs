//! Live event emitter port.
//!
//! This is the only path by which mutation handlers cause client-visible
//! state to propagate live. Both operations are fire-and-forget: they return
//! once the event has been handed to every matching transport (or to none),
//! and delivery failure is never surfaced to the caller. A client that was
//! offline catches up later through the pull-based notification list.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::live::LiveEvent;

/// Emits transient events to connected clients.
///
/// # Contract
///
/// - `broadcast` reaches every currently connected transport.
/// - `send_to_user` reaches only transports enrolled in the user's personal
///   channel; with zero live connections it is a silent no-op, not an error.
/// - Neither operation blocks the calling mutation on delivery success, and
///   neither returns an error. There is no retry, timeout, or queueing.
/// - For a single connection, events emitted in call order arrive in call
///   order. No cross-connection ordering guarantee exists.
#[async_trait]
pub trait LiveEventEmitter: Send + Sync {
    /// Deliver to every connected transport, regardless of identity.
    async fn broadcast(&self, event: LiveEvent);

    /// Deliver only to the transports of one identity.
    async fn send_to_user(&self, user_id: &UserId, event: LiveEvent);
}
