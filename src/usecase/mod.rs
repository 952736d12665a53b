//! Application use cases: the event router (coordination engine) and the
//! HTTP-facing room operations.

mod create_room;
mod get_room;
mod router;

pub use create_room::{CreateRoomError, CreateRoomUseCase};
pub use get_room::GetRoomUseCase;
pub use router::EventRouter;
