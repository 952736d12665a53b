//! Shared application state for the HTTP/WebSocket handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{CreateRoomUseCase, EventRouter, GetRoomUseCase};

/// Shared application state
pub struct AppState {
    /// Coordination engine for real-time events
    pub router: Arc<EventRouter>,
    /// Outbound delivery seam; the WebSocket handler registers each
    /// connection's channel here
    pub pusher: Arc<dyn MessagePusher>,
    /// UseCase for room creation
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// UseCase for room lookup
    pub get_room_usecase: Arc<GetRoomUseCase>,
}
