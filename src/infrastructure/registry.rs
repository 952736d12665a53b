//! Connection registry: which live connections are in which rooms.
//!
//! Exclusively owns the connection-to-room mapping. A connection may be
//! joined to several rooms at once (joining a second room does not leave
//! the first), so membership is tracked as a set per connection together
//! with the display name presented at each join. Both directions of the
//! mapping live under one mutex so they can never drift apart.

use std::collections::{HashMap, HashSet};

use tokio::sync::Mutex;

use crate::domain::ConnectionId;

#[derive(Default)]
struct RegistryInner {
    /// connection -> (room id -> display name presented at join)
    connections: HashMap<ConnectionId, HashMap<String, String>>,
    /// room id -> member connections
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

/// In-memory registry of room membership for live connections.
///
/// Instantiated per server (no process-wide globals), which keeps multiple
/// independent server instances testable in one process.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Mutex<RegistryInner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `connection_id` joined `room_id` under `user`.
    ///
    /// A connection must be joined before any room-scoped event is routed
    /// to it. Re-joining the same room just updates the display name.
    pub async fn join(&self, connection_id: ConnectionId, room_id: &str, user: &str) {
        let mut inner = self.inner.lock().await;
        inner
            .connections
            .entry(connection_id)
            .or_default()
            .insert(room_id.to_string(), user.to_string());
        inner
            .rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(connection_id);
    }

    /// Remove `connection_id` from `room_id`, returning the display name it
    /// joined under. Idempotent: leaving a room the connection never joined
    /// returns `None`.
    pub async fn leave(&self, connection_id: ConnectionId, room_id: &str) -> Option<String> {
        let mut inner = self.inner.lock().await;
        let user = inner
            .connections
            .get_mut(&connection_id)
            .and_then(|rooms| rooms.remove(room_id));
        if let Some(members) = inner.rooms.get_mut(room_id) {
            members.remove(&connection_id);
            if members.is_empty() {
                inner.rooms.remove(room_id);
            }
        }
        user
    }

    /// Member connections of a room, for fan-out. No ordering guarantee.
    pub async fn members(&self, room_id: &str) -> Vec<ConnectionId> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(room_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Point-in-time snapshot of the display names present in a room.
    /// Names are not unique, so duplicates are possible. No ordering
    /// guarantee.
    pub async fn occupants(&self, room_id: &str) -> Vec<String> {
        let inner = self.inner.lock().await;
        let Some(members) = inner.rooms.get(room_id) else {
            return Vec::new();
        };
        members
            .iter()
            .filter_map(|id| {
                inner
                    .connections
                    .get(id)
                    .and_then(|rooms| rooms.get(room_id))
                    .cloned()
            })
            .collect()
    }

    /// Remove a connection from every room it joined, returning
    /// `(room_id, display name)` pairs for the caller to announce.
    /// Called on disconnect so presence lists do not accumulate ghosts.
    pub async fn drain_connection(&self, connection_id: ConnectionId) -> Vec<(String, String)> {
        let mut inner = self.inner.lock().await;
        let Some(joined) = inner.connections.remove(&connection_id) else {
            return Vec::new();
        };
        for room_id in joined.keys() {
            if let Some(members) = inner.rooms.get_mut(room_id) {
                members.remove(&connection_id);
                if members.is_empty() {
                    inner.rooms.remove(room_id);
                }
            }
        }
        joined.into_iter().collect()
    }
}
