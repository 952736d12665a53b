//! Message pusher trait.
//!
//! Abstracts "deliver this serialized event to these connections" so the
//! coordination engine does not depend on the WebSocket transport.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ConnectionId;

/// Per-connection outbound channel. The WebSocket handler drains the
/// receiving side into the socket.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Outbound delivery seam between the coordination engine and the transport.
///
/// Delivery is best-effort at-most-once: individual target failures are
/// logged and skipped, never surfaced to the caller.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound channel.
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection's outbound channel.
    async fn unregister_connection(&self, connection_id: ConnectionId);

    /// Fan one serialized event out to the given targets.
    async fn broadcast(&self, targets: &[ConnectionId], content: &str);
}
