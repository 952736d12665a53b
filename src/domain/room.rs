//! Room entity and its value objects.

use thiserror::Error;
use uuid::Uuid;

/// Display name assigned when a room is created without one.
pub const DEFAULT_ROOM_NAME: &str = "Study Room";

/// Number of characters in a generated room id.
const GENERATED_ID_LEN: usize = 7;

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Validation error for [`RoomId`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("room id must not be empty")]
    Empty,
}

/// Opaque unique identifier of a room.
///
/// Globally unique and never reused; uniqueness is enforced by the store's
/// key constraint, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Result<Self, RoomIdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(RoomIdError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Factory for short, URL-friendly room ids.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a fresh 7-character lowercase hex id.
    ///
    /// The id space is small enough that collisions are possible in theory;
    /// the creation path retries on the store's duplicate-key error.
    pub fn generate() -> RoomId {
        let hex = Uuid::new_v4().simple().to_string();
        RoomId(hex[..GENERATED_ID_LEN].to_string())
    }
}

/// Durable record of one study room.
///
/// `notes` is the shared document (last writer wins); `last_activity` is
/// bumped by any room traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub last_activity: Timestamp,
}

impl Room {
    /// Create a room with empty notes. `name` falls back to
    /// [`DEFAULT_ROOM_NAME`] when absent.
    pub fn new(id: RoomId, name: Option<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            name: name.unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string()),
            notes: String::new(),
            created_at,
            last_activity: created_at,
        }
    }

    /// Record room traffic.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_activity = now;
    }

    /// Overwrite the shared notes and record the activity in one step.
    pub fn set_notes(&mut self, notes: String, now: Timestamp) {
        self.notes = notes;
        self.last_activity = now;
    }
}
