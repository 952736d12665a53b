//! HTTP and WebSocket surface of the study room server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
