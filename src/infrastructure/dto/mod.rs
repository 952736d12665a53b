//! Data transfer objects for the HTTP boundary.

pub mod http;

pub use http::RoomDto;
