//! Domain model for the study room coordination layer.
//!
//! Entities and value objects live here together with the trait seams
//! (`RoomStore`, `MessagePusher`) that the infrastructure layer implements
//! (dependency inversion, same as the repository/pusher split upstream
//! layers depend on).

mod connection;
mod event;
mod pusher;
mod room;
mod store;
mod timer;

pub use connection::ConnectionId;
pub use event::{ClientEvent, ServerEvent};
pub use pusher::{MessagePusher, PusherChannel};
pub use room::{DEFAULT_ROOM_NAME, Room, RoomId, RoomIdError, RoomIdFactory, Timestamp};
pub use store::{RoomStore, StoreError};
pub use timer::TimerState;

#[cfg(test)]
pub use store::MockRoomStore;
