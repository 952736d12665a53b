//! Infrastructure implementations of the domain's trait seams, plus the
//! in-memory coordination state (connection registry, timer board).

pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod timer;
