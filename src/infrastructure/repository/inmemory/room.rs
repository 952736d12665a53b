//! In-memory room store.
//!
//! A `HashMap` keyed by room id stands in for the database. The map's key
//! uniqueness is the store-level constraint that makes generated room ids
//! collision-checked. Rooms are never deleted (stale-room GC is out of
//! scope).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Room, RoomStore, StoreError, Timestamp};

/// In-memory [`RoomStore`] implementation.
#[derive(Default)]
pub struct InMemoryRoomStore {
    rooms: Mutex<HashMap<String, Room>>,
}

impl InMemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomStore for InMemoryRoomStore {
    async fn insert_room(&self, room: Room) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let key = room.id.as_str().to_string();
        if rooms.contains_key(&key) {
            return Err(StoreError::DuplicateRoomId(key));
        }
        rooms.insert(key, room);
        Ok(())
    }

    async fn find_room(&self, room_id: &str) -> Result<Room, StoreError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| StoreError::RoomNotFound(room_id.to_string()))
    }

    async fn touch_activity(&self, room_id: &str, now: Timestamp) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.to_string()))?;
        room.touch(now);
        Ok(())
    }

    async fn update_notes(
        &self,
        room_id: &str,
        notes: String,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StoreError::RoomNotFound(room_id.to_string()))?;
        room.set_notes(notes, now);
        Ok(())
    }
}
