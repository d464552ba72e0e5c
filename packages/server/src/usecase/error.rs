//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, RoomCode, SessionError, ValueObjectError};

/// Broadcast Hub がイベントを処理できなかった理由
///
/// クライアントには通知されず、ログにのみ残ります。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error(transparent)]
    NoSession(#[from] SessionError),

    #[error(transparent)]
    Room(#[from] RepositoryError),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Push(#[from] MessagePushError),

    #[error("failed to encode event: {0}")]
    Encode(String),
}

/// HTTP の join ステップの失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    #[error("username and room code are required")]
    MissingFields,

    #[error(transparent)]
    InvalidField(ValueObjectError),

    #[error("room '{0}' already exists, try a different code")]
    RoomExists(RoomCode),

    #[error("room '{0}' doesn't exist")]
    RoomNotFound(RoomCode),
}

impl JoinError {
    /// Machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            JoinError::MissingFields => "missing_fields",
            JoinError::InvalidField(_) => "invalid_field",
            JoinError::RoomExists(_) => "room_exists",
            JoinError::RoomNotFound(_) => "room_not_found",
        }
    }
}

impl From<ValueObjectError> for JoinError {
    fn from(e: ValueObjectError) -> Self {
        match e {
            ValueObjectError::Empty(_) => JoinError::MissingFields,
            other => JoinError::InvalidField(other),
        }
    }
}

/// ルーム詳細取得の失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}

/// アップロードの失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("no file part")]
    NoFile,

    #[error("no selected file")]
    EmptyFileName,

    #[error("file type not allowed")]
    ExtensionNotAllowed,

    #[error("file is too large ({actual} > {max} bytes)")]
    TooLarge { max: usize, actual: usize },
}

impl UploadError {
    /// Machine-readable reason code
    pub fn reason(&self) -> &'static str {
        match self {
            UploadError::NoFile => "no_file",
            UploadError::EmptyFileName => "empty_file_name",
            UploadError::ExtensionNotAllowed => "extension_not_allowed",
            UploadError::TooLarge { .. } => "too_large",
        }
    }
}
