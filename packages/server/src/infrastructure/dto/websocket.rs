//! WebSocket event frames.
//!
//! Every frame is a JSON object tagged by `"type"`, whose value is the
//! snake_case event name.

use serde::{Deserialize, Serialize};

/// Category of an attached file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileTypeDto {
    Image,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachmentDto {
    pub original_name: String,
    pub file_type: FileTypeDto,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub author: String,
    pub text: Option<String>,
    pub attachment: Option<FileAttachmentDto>,
    /// Unix timestamp in milliseconds
    pub sent_at: i64,
}

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinRoom,
    LeaveRoom,
    Message {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        attachment: Option<FileAttachmentDto>,
    },
    UpdateRoomInfo {
        #[serde(default)]
        display_name: Option<String>,
    },
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    UserJoin {
        username: String,
        members: Vec<String>,
        display_name: String,
    },
    UserLeave {
        username: String,
        members: Vec<String>,
    },
    MessageHistory {
        messages: Vec<MessageDto>,
    },
    Message(MessageDto),
    RoomUpdated {
        display_name: String,
    },
}
