//! Room store trait.
//!
//! The domain layer defines the persistence interface it needs; the
//! infrastructure layer provides the implementation (dependency inversion).

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use super::{Room, Timestamp};

/// Errors surfaced at the store boundary.
///
/// Nothing here is allowed to propagate into the real-time broadcast path;
/// callers on that path log and continue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No room record matches the given id.
    #[error("room '{0}' was not found")]
    RoomNotFound(String),
    /// A room with the same id already exists. Handled internally by
    /// regenerating the id; never surfaced to clients.
    #[error("room id '{0}' already exists")]
    DuplicateRoomId(String),
    /// The persistence layer is unreachable.
    #[error("room store unavailable: {0}")]
    Unavailable(String),
}

/// Durable record of room identity, shared notes, and activity.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Persist a new room. Fails with [`StoreError::DuplicateRoomId`] when
    /// the id is already taken.
    async fn insert_room(&self, room: Room) -> Result<(), StoreError>;

    /// Read-only lookup by exact id.
    async fn find_room(&self, room_id: &str) -> Result<Room, StoreError>;

    /// Bump `last_activity`. Best-effort: a missing room is an error for
    /// the caller to log, not to act on.
    async fn touch_activity(&self, room_id: &str, now: Timestamp) -> Result<(), StoreError>;

    /// Overwrite the shared notes and bump `last_activity` in a single
    /// update. Last writer wins, no merge.
    async fn update_notes(
        &self,
        room_id: &str,
        notes: String,
        now: Timestamp,
    ) -> Result<(), StoreError>;
}
