//! Wire events exchanged over the per-connection WebSocket channel.
//!
//! Both directions use the same envelope:
//! `{"event": "<kebab-case name>", "data": {...camelCase fields...}}`.
//! Deserialization failure (unknown event, missing field, wrong type) is a
//! malformed event: the handler logs and drops it, the connection stays up.

use serde::{Deserialize, Serialize};

/// Event received from a client connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, user: String },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String, user: String },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        room_id: String,
        user: String,
        message: String,
        /// Client-supplied epoch millis, relayed as-is.
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    NoteUpdate { room_id: String, notes: String },
    #[serde(rename_all = "camelCase")]
    TimerStart { room_id: String, duration: u64 },
    #[serde(rename_all = "camelCase")]
    TimerStop { room_id: String },
    #[serde(rename_all = "camelCase")]
    TimerEnded { room_id: String },
}

/// Event pushed from the server to client connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserJoined {
        user: String,
    },
    UserLeft {
        user: String,
    },
    #[serde(rename_all = "camelCase")]
    ChatMessage {
        room_id: String,
        user: String,
        message: String,
        timestamp: i64,
    },
    NoteUpdate {
        notes: String,
    },
    TimerStart {
        duration: u64,
    },
    TimerStop {},
    TimerEnded {},
}
