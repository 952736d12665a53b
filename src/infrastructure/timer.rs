//! Per-room timer board.
//!
//! Tracks the observational [`TimerState`] for each room as client signals
//! are relayed. Not persisted and not authoritative: clients run their own
//! countdowns, the server only mirrors the last relayed transition.

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::TimerState;

/// In-memory map of room id to timer state.
#[derive(Default)]
pub struct TimerBoard {
    timers: Mutex<HashMap<String, TimerState>>,
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn on_start(&self, room_id: &str, duration_seconds: u64) {
        let mut timers = self.timers.lock().await;
        let state = timers.entry(room_id.to_string()).or_default();
        *state = state.start(duration_seconds);
    }

    pub async fn on_stop(&self, room_id: &str) {
        let mut timers = self.timers.lock().await;
        let state = timers.entry(room_id.to_string()).or_default();
        *state = state.stop();
    }

    pub async fn on_ended(&self, room_id: &str) {
        let mut timers = self.timers.lock().await;
        let state = timers.entry(room_id.to_string()).or_default();
        *state = state.ended();
    }

    /// Current state for a room; rooms with no timer history are `Idle`.
    pub async fn state(&self, room_id: &str) -> TimerState {
        let timers = self.timers.lock().await;
        timers.get(room_id).copied().unwrap_or_default()
    }
}
