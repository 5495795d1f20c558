//! WebSocket endpoint: the push side of the live channel.
//!
//! `GET /ws?token=<jwt>` upgrades to a WebSocket. The token is verified
//! BEFORE the upgrade is accepted; an anonymous or invalid connect is
//! refused with 401 and never touches the registry. The channel is
//! push-only: inbound frames other than ping/close are ignored.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::TokenVerifier;

use super::registry::ConnectionRegistry;

/// Shared state for the live endpoint.
#[derive(Clone)]
pub struct LiveState {
    pub registry: Arc<ConnectionRegistry>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Builds the `/ws` route.
pub fn routes(state: LiveState) -> Router {
    Router::new().route("/ws", get(ws_upgrade)).with_state(state)
}

#[derive(Debug, Deserialize)]
struct ConnectParams {
    #[serde(default)]
    token: String,
}

async fn ws_upgrade(
    State(state): State<LiveState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Response {
    match state.verifier.verify(&params.token).await {
        Ok(user) => {
            let registry = state.registry.clone();
            ws.on_upgrade(move |socket| serve_connection(socket, registry, user))
        }
        Err(error) => {
            tracing::debug!(%error, "websocket connect refused");
            (StatusCode::UNAUTHORIZED, error.to_string()).into_response()
        }
    }
}

/// Pumps registry events onto the socket until either side goes away.
async fn serve_connection(
    socket: WebSocket,
    registry: Arc<ConnectionRegistry>,
    user: AuthenticatedUser,
) {
    let (connection_id, mut events) = registry.register(&user.id).await;
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let frame = event.to_frame().to_string();
                if sink.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(Message::Ping(payload))) => {
                        let _ = sink.send(Message::Pong(payload)).await;
                    }
                    // Clients have nothing to say on this channel.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.unregister(&user.id, &connection_id).await;
}
