//! HTTP route handlers: room creation/lookup and liveness probes.
//!
//! Thin CRUD glue over the use cases. Errors come back as structured JSON
//! with an `error` field and an appropriate status code.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::StoreError;
use crate::infrastructure::dto::RoomDto;

use super::super::state::AppState;

/// Request body for room creation.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
}

/// `GET /` - API index
pub async fn index() -> Json<Value> {
    Json(json!({"message": "Study Room API", "status": "online"}))
}

/// `GET /ping` - liveness probe
pub async fn ping() -> &'static str {
    "OK"
}

/// `POST /api/rooms` - create a room with a generated id
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomDto>), (StatusCode, Json<Value>)> {
    match state.create_room_usecase.execute(request.name).await {
        Ok(room) => Ok((StatusCode::CREATED, Json(RoomDto::from(&room)))),
        Err(e) => {
            tracing::error!("Error creating room: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to create room"})),
            ))
        }
    }
}

/// `GET /api/rooms/{room_id}` - fetch a room record
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDto>, (StatusCode, Json<Value>)> {
    match state.get_room_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDto::from(&room))),
        Err(StoreError::RoomNotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Room not found"})),
        )),
        Err(e) => {
            tracing::error!("Error fetching room '{}': {}", room_id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch room"})),
            ))
        }
    }
}
