//! WebSocket endpoint.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use markethub_realtime::connection::authenticator::AuthenticatedConnection;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters of the upgrade request.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// JWT access token.
    pub token: String,
}

/// GET /ws?token={jwt}
///
/// The token is resolved before the upgrade completes, so bad or banned
/// credentials are rejected as plain HTTP and never get a socket.
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> Result<Response, ApiError> {
    let auth = state.ws_auth.authenticate(&query.token).await?;

    Ok(ws.on_upgrade(move |socket| drive_socket(state, auth, socket)))
}

/// Pumps one established connection until either side goes away.
///
/// A single task services both directions: queued pushes drain to the
/// socket, inbound frames feed the connection manager. When the loop exits
/// for any reason the connection is unregistered, which is what releases
/// the user's presence entry.
async fn drive_socket(state: AppState, auth: AuthenticatedConnection, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();

    let (handle, mut outbound) =
        state
            .connections
            .register(auth.user_id, auth.username.clone(), auth.role);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %auth.user_id, "WebSocket connected");

    loop {
        tokio::select! {
            queued = outbound.recv() => {
                let Some(msg) = queued else { break };
                if sink.send(Message::Text(msg.into())).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        state.connections.handle_inbound(&conn_id, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(conn_id = %conn_id, error = %e, "WebSocket read failed");
                        break;
                    }
                }
            }
        }
    }

    state.connections.unregister(&conn_id);
    info!(conn_id = %conn_id, user_id = %auth.user_id, "WebSocket disconnected");
}
