//! Server assembly and execution.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::domain::MessagePusher;
use crate::usecase::{CreateRoomUseCase, EventRouter, GetRoomUseCase};

use super::{
    handler::{
        http::{create_room, get_room, index, ping},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Study room server.
///
/// Bundles the coordination engine and the HTTP use cases and exposes the
/// combined HTTP + WebSocket surface.
pub struct Server {
    router: Arc<EventRouter>,
    pusher: Arc<dyn MessagePusher>,
    create_room_usecase: Arc<CreateRoomUseCase>,
    get_room_usecase: Arc<GetRoomUseCase>,
}

impl Server {
    pub fn new(
        router: Arc<EventRouter>,
        pusher: Arc<dyn MessagePusher>,
        create_room_usecase: Arc<CreateRoomUseCase>,
        get_room_usecase: Arc<GetRoomUseCase>,
    ) -> Self {
        Self {
            router,
            pusher,
            create_room_usecase,
            get_room_usecase,
        }
    }

    /// Build the axum application. Exposed separately from [`Server::run`]
    /// so tests can serve it on an ephemeral port.
    pub fn app(self) -> Router {
        let app_state = Arc::new(AppState {
            router: self.router,
            pusher: self.pusher,
            create_room_usecase: self.create_room_usecase,
            get_room_usecase: self.get_room_usecase,
        });

        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/", get(index))
            .route("/ping", get(ping))
            .route("/api/rooms", post(create_room))
            .route("/api/rooms/{room_id}", get(get_room))
            // Frontends are served from another origin; keep the API and
            // the upgrade endpoint open to all of them.
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 5000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the address or if
    /// serving fails.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.app();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Study room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
