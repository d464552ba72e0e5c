//! Domain error types.

use thiserror::Error;

use super::value_object::{ConnectionId, RoomCode};

/// Validation failure when building a value object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{field} is too long ({actual} > {max} characters)")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Room Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    NotFound(RoomCode),

    #[error("room '{0}' already exists")]
    AlreadyExists(RoomCode),
}

/// Session Binding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no session bound to connection '{0}'")]
    NoSession(ConnectionId),
}

/// Fan-out errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is not registered")]
    ClientNotFound(ConnectionId),

    #[error("push failed: {0}")]
    PushFailed(String),
}
