//! Domain layer: value objects, entities, the room aggregate and the
//! interfaces the outer layers implement.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_log;
pub mod message_pusher;
mod presence;
pub mod repository;
pub mod room_state;
pub mod value_object;

pub use entity::{ChatMessage, FileAttachment, FileKind, Room, Session};
pub use error::{MessagePushError, RepositoryError, SessionError, ValueObjectError};
pub use event::RoomEvent;
pub use message_log::MessageLog;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository};
pub use room_state::{RoomLock, RoomState};
pub use value_object::{ConnectionId, DisplayName, MessageText, RoomCode, Timestamp, Username};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
