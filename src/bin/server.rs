//! Real-time collaborative study room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 5000
//! ```

use std::sync::Arc;

use clap::Parser;
use study_room_rs::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::ConnectionRegistry,
        repository::InMemoryRoomStore, timer::TimerBoard,
    },
    ui::Server,
    usecase::{CreateRoomUseCase, EventRouter, GetRoomUseCase},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Collaborative study room server with shared notes, chat, and timer", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Store / registry / pusher / timer board
    // 2. Coordination engine
    // 3. HTTP use cases
    // 4. Server

    let store = Arc::new(InMemoryRoomStore::new());
    let registry = Arc::new(ConnectionRegistry::new());
    let pusher = Arc::new(WebSocketMessagePusher::new());
    let timers = Arc::new(TimerBoard::new());
    let clock = Arc::new(SystemClock);

    let router = Arc::new(EventRouter::new(
        store.clone(),
        registry,
        pusher.clone(),
        timers,
        clock.clone(),
    ));

    let create_room_usecase = Arc::new(CreateRoomUseCase::new(store.clone(), clock));
    let get_room_usecase = Arc::new(GetRoomUseCase::new(store));

    let server = Server::new(router, pusher, create_room_usecase, get_room_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
