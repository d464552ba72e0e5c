//! Room-based real-time chat relay.
//!
//! Clients join a named room over HTTP, then exchange room events over a
//! WebSocket. The server keeps rooms, presence and message history in memory
//! and fans every event out to the room's connected members.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
