//! Domain entities.

use super::value_object::{
    ConnectionId, DisplayName, MessageText, RoomCode, Timestamp, Username,
};

/// A code-addressed chat room.
///
/// `members` keeps insertion order and never holds the same username twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: RoomCode,
    pub display_name: DisplayName,
    pub created_at: Timestamp,
    pub members: Vec<Username>,
}

impl Room {
    pub fn new(code: RoomCode, display_name: DisplayName, created_at: Timestamp) -> Self {
        Self {
            code,
            display_name,
            created_at,
            members: Vec::new(),
        }
    }

    pub fn is_member(&self, username: &Username) -> bool {
        self.members.contains(username)
    }
}

/// Coarse category of an uploaded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Document,
}

impl FileKind {
    /// Extensions rendered inline as images
    pub const IMAGE_EXTENSIONS: [&'static str; 4] = ["png", "jpg", "jpeg", "gif"];

    pub fn from_extension(extension: &str) -> Self {
        if Self::IMAGE_EXTENSIONS.contains(&extension) {
            FileKind::Image
        } else {
            FileKind::Document
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Document => "document",
        }
    }
}

/// File carried by a message. The relay never looks inside `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub original_name: String,
    pub kind: FileKind,
    pub url: String,
}

/// One entry of a room's history. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: Username,
    pub text: Option<MessageText>,
    pub attachment: Option<FileAttachment>,
    pub sent_at: Timestamp,
}

/// Binding of a live connection to the identity it joined with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub connection_id: ConnectionId,
    pub username: Username,
    pub room_code: RoomCode,
}
