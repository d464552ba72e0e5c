//! Infrastructure layer: concrete repositories, fan-out and wire formats.

pub mod dto;
pub mod message_pusher;
pub mod repository;
