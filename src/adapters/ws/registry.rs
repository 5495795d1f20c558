//! Connection registry: identity → live transports, with presence gauge.
//!
//! One registry is constructed at server start and injected wherever emission
//! is needed; there is no module-level singleton. The registry is also the
//! production implementation of the `LiveEventEmitter` port.
//!
//! # Architecture
//!
//! ```text
//! user:alice           user:bob
//! ├── connection-1     └── connection-3
//! └── connection-2
//! ```
//!
//! Registering enrolls a transport into the global channel and the identity's
//! personal channel; `send_to_user` walks only that identity's transports,
//! `broadcast` walks all of them. One identity may hold several transports
//! (tabs, devices); removing one never evicts the others.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};

use crate::domain::foundation::{ConnectionId, UserId};
use crate::domain::live::{ChannelKey, LiveEvent};
use crate::ports::LiveEventEmitter;

use async_trait::async_trait;

/// One live transport belonging to an identity.
struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<LiveEvent>,
}

/// Tracks which identity owns which live connections.
///
/// # Thread safety
///
/// Uses `RwLock` since emissions (reads) vastly outnumber connects and
/// disconnects (writes), letting concurrent broadcasts proceed together.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<UserId, Vec<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a new transport for an authenticated identity.
    ///
    /// Returns the connection id (needed for cleanup) and the receiver end
    /// of the transport's event queue. The unbounded channel preserves
    /// per-connection emission order.
    ///
    /// Side effect: every connected client, including the new one, receives
    /// an updated `users:count` gauge.
    pub async fn register(
        &self,
        user_id: &UserId,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<LiveEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new();

        {
            let mut connections = self.connections.write().await;
            connections
                .entry(user_id.clone())
                .or_default()
                .push(ConnectionHandle { id, tx });
        }

        tracing::debug!(user = %user_id, connection = %id, "transport registered");
        self.broadcast_gauge().await;
        (id, rx)
    }

    /// Removes one transport of an identity.
    ///
    /// Other transports of the same identity stay live. Re-broadcasts the
    /// gauge afterwards. Unknown ids are ignored (disconnect can race with
    /// cleanup).
    pub async fn unregister(&self, user_id: &UserId, connection_id: &ConnectionId) {
        {
            let mut connections = self.connections.write().await;
            if let Some(handles) = connections.get_mut(user_id) {
                handles.retain(|h| h.id != *connection_id);
                if handles.is_empty() {
                    connections.remove(user_id);
                }
            }
        }

        tracing::debug!(user = %user_id, connection = %connection_id, "transport removed");
        self.broadcast_gauge().await;
    }

    /// Number of currently open transports system-wide.
    pub async fn connection_count(&self) -> usize {
        self.connections
            .read()
            .await
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Whether an identity has at least one live transport.
    pub async fn is_connected(&self, user_id: &UserId) -> bool {
        self.connections.read().await.contains_key(user_id)
    }

    /// Delivers one event to every transport enrolled in a channel.
    ///
    /// Channel membership is implicit: every transport is in the global
    /// channel, and in the personal channel of the identity it registered
    /// under. Empty channels are a silent no-op.
    pub async fn deliver(&self, channel: &ChannelKey, event: LiveEvent) {
        let connections = self.connections.read().await;
        match channel {
            ChannelKey::Global => {
                for handles in connections.values() {
                    for handle in handles {
                        // A closed receiver just means the transport is going away.
                        let _ = handle.tx.send(event.clone());
                    }
                }
            }
            ChannelKey::User(user_id) => {
                if let Some(handles) = connections.get(user_id) {
                    for handle in handles {
                        let _ = handle.tx.send(event.clone());
                    }
                }
                // No handles is the expected common case for offline users.
            }
        }
    }

    async fn broadcast_gauge(&self) {
        let count = self.connection_count().await;
        self.broadcast(LiveEvent::UsersCount(count)).await;
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiveEventEmitter for ConnectionRegistry {
    async fn broadcast(&self, event: LiveEvent) {
        self.deliver(&ChannelKey::global(), event).await;
    }

    async fn send_to_user(&self, user_id: &UserId, event: LiveEvent) {
        self.deliver(&ChannelKey::user(user_id), event).await;
    }
}
