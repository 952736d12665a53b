//! Real-time collaborative study room server library.
//!
//! Rooms share a text document, a chat stream, and a countdown timer.
//! The coordination layer routes events between live connections and
//! reconciles ephemeral socket state with the persisted room record.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
