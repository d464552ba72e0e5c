//! Request handlers.

mod error;
mod http;
mod websocket;

pub use http::{get_room_detail, health_check, join, upload};
pub use websocket::websocket_handler;
