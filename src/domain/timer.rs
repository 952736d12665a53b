//! Per-room countdown timer state machine.
//!
//! The server never runs a countdown clock of its own: every transition is
//! triggered by a relayed client signal, and each client counts down
//! locally. The tracked state is observational, not authoritative.

/// Timer state for one room: `Idle -> Running -> Idle`, re-enterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        /// The duration announced at the last `timer-start`, in seconds.
        /// Relayed as-is, never validated.
        duration_seconds: u64,
    },
}

impl TimerState {
    /// `timer-start`: enter `Running`. A start while already running simply
    /// replaces the announced duration (latest relay wins client-side).
    pub fn start(self, duration_seconds: u64) -> Self {
        Self::Running { duration_seconds }
    }

    /// `timer-stop`: back to `Idle`.
    pub fn stop(self) -> Self {
        Self::Idle
    }

    /// `timer-ended`: back to `Idle`. Two clients may both reach zero and
    /// announce the end near-simultaneously; an end while already `Idle`
    /// is a tolerated no-op.
    pub fn ended(self) -> Self {
        Self::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}
