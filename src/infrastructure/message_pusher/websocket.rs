//! WebSocket-backed message pusher.
//!
//! Owns the map from connection id to the connection's outbound channel.
//! The WebSocket handler creates the channel on accept and drains the
//! receiving side into the socket; this type only ever pushes into the
//! sending side, so a broadcast never waits on a slow socket.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// WebSocket [`MessagePusher`] implementation.
#[derive(Default)]
pub struct WebSocketMessagePusher {
    connections: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut connections = self.connections.lock().await;
        connections.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to pusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: ConnectionId) {
        let mut connections = self.connections.lock().await;
        connections.remove(&connection_id);
        tracing::debug!("Connection '{}' unregistered from pusher", connection_id);
    }

    async fn broadcast(&self, targets: &[ConnectionId], content: &str) {
        let connections = self.connections.lock().await;

        for target in targets {
            match connections.get(target) {
                Some(sender) => {
                    // A closed channel means the connection is tearing down;
                    // skip it, delivery is at-most-once.
                    if sender.send(content.to_string()).is_err() {
                        tracing::warn!("Failed to push message to connection '{}'", target);
                    }
                }
                None => {
                    tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                }
            }
        }
    }
}
