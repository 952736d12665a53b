//! Shared utilities used across layers.

pub mod logger;
pub mod time;
