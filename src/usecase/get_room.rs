//! UseCase: room lookup.

use std::sync::Arc;

use crate::domain::{Room, RoomStore, StoreError};

/// Read-only lookup of a room record by exact id.
pub struct GetRoomUseCase {
    store: Arc<dyn RoomStore>,
}

impl GetRoomUseCase {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, room_id: &str) -> Result<Room, StoreError> {
        self.store.find_room(room_id).await
    }
}
