//! UseCase: HTTP の join ステップ
//!
//! ユーザー名とルームコードを検証し、必要ならルームを作成します。
//! ここでの失敗だけはクライアントに理由付きで返されます。

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{
    DisplayName, RepositoryError, Room, RoomCode, RoomRepository, Timestamp, Username,
};

use super::error::JoinError;

/// join リクエストの入力（未検証）
#[derive(Debug, Clone, Default)]
pub struct JoinInput {
    pub username: Option<String>,
    pub room: Option<String>,
    pub create_new: bool,
    pub room_name: Option<String>,
}

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub username: Username,
    pub room: Room,
}

pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// join を実行
    ///
    /// `create_new` の場合はルームを作成し（表示名の既定値はルームコード）、
    /// そうでなければ既存のルームであることを確認します。
    pub async fn execute(&self, input: JoinInput) -> Result<JoinedRoom, JoinError> {
        let (Some(username), Some(room)) = (input.username, input.room) else {
            return Err(JoinError::MissingFields);
        };
        let username = Username::new(username)?;
        let code = RoomCode::new(room)?;

        let room = if input.create_new {
            let display_name = match input.room_name.filter(|n| !n.trim().is_empty()) {
                Some(name) => DisplayName::new(name)?,
                None => DisplayName::new(code.as_str().to_string())?,
            };
            let created_at = Timestamp::new(self.clock.now_millis());
            self.repository
                .create_room(code, display_name, created_at)
                .await
                .map_err(|e| match e {
                    RepositoryError::AlreadyExists(code) => JoinError::RoomExists(code),
                    RepositoryError::NotFound(code) => JoinError::RoomNotFound(code),
                })?
        } else {
            self.repository
                .get_room(&code)
                .await
                .map_err(|_| JoinError::RoomNotFound(code))?
        };

        tracing::info!("'{}' passed the join step for room '{}'", username, room.code);

        Ok(JoinedRoom { username, room })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::ValueObjectError, infrastructure::repository::InMemoryRoomRepository,
    };
    use huddle_shared::time::FixedClock;

    fn create_usecase() -> (JoinRoomUseCase, Arc<InMemoryRoomRepository>) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(FixedClock::new(1000)));
        (usecase, repository)
    }

    fn input(username: &str, room: &str, create_new: bool, room_name: Option<&str>) -> JoinInput {
        JoinInput {
            username: Some(username.to_string()),
            room: Some(room.to_string()),
            create_new,
            room_name: room_name.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_create_new_room() {
        // テスト項目: create_new でルームが作成される
        // given (前提条件):
        let (usecase, repository) = create_usecase();

        // when (操作):
        let joined = usecase
            .execute(input("alice", "abc123", true, Some("Team Sync")))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(joined.username.as_str(), "alice");
        assert_eq!(joined.room.display_name.as_str(), "Team Sync");
        assert_eq!(joined.room.created_at, Timestamp::new(1000));
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_create_new_room_defaults_name_to_code() {
        // テスト項目: 表示名が省略されたらルームコードが表示名になる
        // given (前提条件):
        let (usecase, _repository) = create_usecase();

        // when (操作):
        let joined = usecase
            .execute(input("alice", "abc123", true, None))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(joined.room.display_name.as_str(), "abc123");
    }

    #[tokio::test]
    async fn test_create_existing_room_fails() {
        // テスト項目: 既存のコードで create_new すると RoomExists
        // given (前提条件):
        let (usecase, _repository) = create_usecase();
        usecase
            .execute(input("alice", "abc123", true, None))
            .await
            .unwrap();

        // when (操作):
        let result = usecase.execute(input("bob", "abc123", true, None)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::RoomExists(RoomCode::new("abc123".to_string()).unwrap()))
        );
    }

    #[tokio::test]
    async fn test_join_existing_room() {
        // テスト項目: 既存のルームに参加できる
        // given (前提条件):
        let (usecase, _repository) = create_usecase();
        usecase
            .execute(input("alice", "abc123", true, Some("Team Sync")))
            .await
            .unwrap();

        // when (操作):
        let joined = usecase
            .execute(input("bob", "abc123", false, None))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(joined.username.as_str(), "bob");
        assert_eq!(joined.room.display_name.as_str(), "Team Sync");
    }

    #[tokio::test]
    async fn test_join_missing_room_fails() {
        // テスト項目: 存在しないルームへの参加は RoomNotFound
        // given (前提条件):
        let (usecase, _repository) = create_usecase();

        // when (操作):
        let result = usecase.execute(input("bob", "nowhere", false, None)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinError::RoomNotFound(RoomCode::new("nowhere".to_string()).unwrap()))
        );
    }

    #[tokio::test]
    async fn test_missing_fields() {
        // テスト項目: ユーザー名・ルームコードの欠落や空文字は MissingFields
        // given (前提条件):
        let (usecase, _repository) = create_usecase();

        // when (操作):
        let no_room = usecase
            .execute(JoinInput {
                username: Some("alice".to_string()),
                ..JoinInput::default()
            })
            .await;
        let blank_username = usecase.execute(input("  ", "abc123", true, None)).await;

        // then (期待する結果):
        assert_eq!(no_room, Err(JoinError::MissingFields));
        assert_eq!(blank_username, Err(JoinError::MissingFields));
    }

    #[tokio::test]
    async fn test_oversized_username_is_invalid_field() {
        // テスト項目: 長すぎるユーザー名は InvalidField
        // given (前提条件):
        let (usecase, _repository) = create_usecase();
        let long_name = "a".repeat(crate::domain::value_object::USERNAME_MAX_LEN + 1);

        // when (操作):
        let result = usecase.execute(input(&long_name, "abc123", true, None)).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(JoinError::InvalidField(ValueObjectError::TooLong { .. }))
        ));
    }
}
