//! Inbound room events, as seen by the Broadcast Hub.
//!
//! Payload fields are still raw here; the hub validates them and drops the
//! event on failure.

use super::entity::FileAttachment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    JoinRoom,
    LeaveRoom,
    Message {
        text: Option<String>,
        attachment: Option<FileAttachment>,
    },
    UpdateRoomInfo {
        display_name: Option<String>,
    },
    /// Produced by the transport when the connection goes away
    Disconnect,
}

impl RoomEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::JoinRoom => "join_room",
            RoomEvent::LeaveRoom => "leave_room",
            RoomEvent::Message { .. } => "message",
            RoomEvent::UpdateRoomInfo { .. } => "update_room_info",
            RoomEvent::Disconnect => "disconnect",
        }
    }
}
