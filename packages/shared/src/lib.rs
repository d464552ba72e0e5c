//! Utilities shared by the huddle binaries: logging setup and time handling.

pub mod logger;
pub mod time;
