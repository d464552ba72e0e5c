//! InMemory Session Binding 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Session, SessionError, SessionRepository};

/// 接続 ID → セッションのインメモリ対応表
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<ConnectionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn bind(&self, session: Session) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        tracing::debug!(
            "Connection '{}' bound to '{}' in room '{}'",
            session.connection_id,
            session.username,
            session.room_code
        );
        sessions.insert(session.connection_id.clone(), session)
    }

    async fn resolve(&self, connection_id: &ConnectionId) -> Result<Session, SessionError> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(connection_id)
            .cloned()
            .ok_or_else(|| SessionError::NoSession(connection_id.clone()))
    }

    async fn unbind(&self, connection_id: &ConnectionId) -> Option<Session> {
        let removed = self.sessions.lock().await.remove(connection_id);
        if removed.is_some() {
            tracing::debug!("Connection '{}' unbound", connection_id);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomCode, Username};

    fn session(connection_id: &str, username: &str, room: &str) -> Session {
        Session {
            connection_id: ConnectionId::from(connection_id),
            username: Username::new(username.to_string()).unwrap(),
            room_code: RoomCode::new(room.to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_bind_then_resolve() {
        // テスト項目: 登録したセッションを接続 ID で引ける
        // given (前提条件):
        let repo = InMemorySessionRepository::new();

        // when (操作):
        let previous = repo.bind(session("c1", "alice", "abc123")).await;
        let resolved = repo.resolve(&ConnectionId::from("c1")).await;

        // then (期待する結果):
        assert!(previous.is_none());
        assert_eq!(resolved, Ok(session("c1", "alice", "abc123")));
    }

    #[tokio::test]
    async fn test_bind_overwrites_previous_binding() {
        // テスト項目: 同じ接続 ID への再登録は上書きになる
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        repo.bind(session("c1", "alice", "abc123")).await;

        // when (操作):
        let previous = repo.bind(session("c1", "alice", "xyz789")).await;

        // then (期待する結果):
        assert_eq!(previous, Some(session("c1", "alice", "abc123")));
        assert_eq!(
            repo.resolve(&ConnectionId::from("c1")).await,
            Ok(session("c1", "alice", "xyz789"))
        );
        assert_eq!(repo.count_sessions().await, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_connection_fails() {
        // テスト項目: 未登録の接続 ID は NoSession
        // given (前提条件):
        let repo = InMemorySessionRepository::new();

        // when (操作):
        let result = repo.resolve(&ConnectionId::from("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SessionError::NoSession(ConnectionId::from("ghost")))
        );
    }

    #[tokio::test]
    async fn test_unbind_is_idempotent() {
        // テスト項目: 二度目の unbind は何もしない
        // given (前提条件):
        let repo = InMemorySessionRepository::new();
        repo.bind(session("c1", "alice", "abc123")).await;

        // when (操作):
        let first = repo.unbind(&ConnectionId::from("c1")).await;
        let second = repo.unbind(&ConnectionId::from("c1")).await;

        // then (期待する結果):
        assert_eq!(first, Some(session("c1", "alice", "abc123")));
        assert_eq!(second, None);
        assert!(repo.resolve(&ConnectionId::from("c1")).await.is_err());
    }
}
