//! WebSocket connection handler.
//!
//! One logical event channel per connection, multiplexed across rooms by
//! the registry. The handler assigns the connection id, wires the outbound
//! channel into the pusher, and feeds inbound events to the router in
//! arrival order (per-sender FIFO). Teardown of either direction triggers
//! disconnect cleanup for every room the connection joined.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ClientEvent, ConnectionId};

use super::super::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drain the per-connection channel into the WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // The transport assigns the connection id; it is never reused.
    let connection_id = ConnectionId::new();

    let (tx, rx) = mpsc::unbounded_channel();
    state.pusher.register_connection(connection_id, tx).await;
    tracing::info!("Connection '{}' established", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let router = state.router.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    // A malformed payload is dropped; it must not take the
                    // connection or the process down.
                    match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => router.dispatch(connection_id, event).await,
                        Err(e) => {
                            tracing::warn!(
                                "Dropping malformed event from '{}': {}",
                                connection_id,
                                e
                            );
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled by the protocol layer.
                _ => {}
            }
        }
    });

    // If either direction finishes, tear down the other.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Registry cleanup and user-left fan-out for every joined room, run
    // synchronously with teardown so presence lists never keep ghosts.
    state.router.handle_disconnect(connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}
