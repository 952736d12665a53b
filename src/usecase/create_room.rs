//! UseCase: room creation.

use std::sync::Arc;

use thiserror::Error;

use crate::common::time::Clock;
use crate::domain::{Room, RoomIdFactory, RoomStore, StoreError, Timestamp};

/// Generated ids collide rarely; a handful of retries is plenty before we
/// conclude something is systematically wrong.
const MAX_ID_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum CreateRoomError {
    /// Every generated id collided. Practically unreachable in steady
    /// operation; surfaced as a server error rather than retrying forever.
    #[error("could not allocate a unique room id")]
    IdAllocationFailed,
    #[error(transparent)]
    Store(StoreError),
}

/// Creates a room with a freshly generated unique id.
pub struct CreateRoomUseCase {
    store: Arc<dyn RoomStore>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(store: Arc<dyn RoomStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Generate an id, persist the room, and return the record. An id
    /// collision is handled by regenerating; other store errors surface.
    pub async fn execute(&self, name: Option<String>) -> Result<Room, CreateRoomError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = RoomIdFactory::generate();
            let room = Room::new(id, name.clone(), Timestamp::new(self.clock.now_millis()));
            match self.store.insert_room(room.clone()).await {
                Ok(()) => {
                    tracing::info!("Room '{}' ({}) created", room.id.as_str(), room.name);
                    return Ok(room);
                }
                Err(StoreError::DuplicateRoomId(taken)) => {
                    tracing::debug!(
                        "Room id '{}' collided (attempt {}), regenerating",
                        taken,
                        attempt
                    );
                }
                Err(e) => return Err(CreateRoomError::Store(e)),
            }
        }
        Err(CreateRoomError::IdAllocationFailed)
    }
}
