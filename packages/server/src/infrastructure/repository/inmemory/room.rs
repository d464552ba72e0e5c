//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//!
//! ## ロックの構成
//!
//! - 外側の `rooms` マップはコード → ルームハンドルの対応を守るだけで、短時間しか保持しない
//! - 各ルームは自分専用の `Mutex<RoomState>` を持ち、イベント処理の間はこちらを保持する
//!
//! ルームのロックを保持したままマップのロックを取ることはあっても、その逆はない
//! （マップのロックを保持したままルームのロックを待たない）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, RepositoryError, Room, RoomCode, RoomLock, RoomRepository, RoomState, Timestamp,
};

type RoomHandle = Arc<Mutex<RoomState>>;

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomCode, RoomHandle>>,
}

impl InMemoryRoomRepository {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn handle(&self, code: &RoomCode) -> Result<RoomHandle, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(code.clone()))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        code: RoomCode,
        display_name: DisplayName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&code) {
            return Err(RepositoryError::AlreadyExists(code));
        }

        let room = Room::new(code.clone(), display_name, created_at);
        rooms.insert(code, Arc::new(Mutex::new(RoomState::new(room.clone()))));
        tracing::info!(
            "Room '{}' created as '{}'",
            room.code.as_str(),
            room.display_name.as_str()
        );

        Ok(room)
    }

    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError> {
        let room = self.lock_room(code).await?;
        Ok(room.room().clone())
    }

    async fn rename_room(
        &self,
        code: &RoomCode,
        display_name: DisplayName,
    ) -> Result<Room, RepositoryError> {
        let mut room = self.lock_room(code).await?;
        room.rename(display_name);
        Ok(room.room().clone())
    }

    async fn lock_room(&self, code: &RoomCode) -> Result<RoomLock, RepositoryError> {
        let handle = self.handle(code).await?;
        let room = handle.lock_owned().await;

        // The room may have been destroyed while we were waiting for its lock
        if room.is_destroyed() {
            return Err(RepositoryError::NotFound(code.clone()));
        }

        Ok(room)
    }

    async fn destroy_room_if_empty(&self, room: &mut RoomState) -> bool {
        if room.is_destroyed() || !room.is_empty() {
            return false;
        }

        room.mark_destroyed();
        let code = room.room().code.clone();
        self.rooms.lock().await.remove(&code);
        tracing::info!("Room '{}' is empty and was destroyed", code.as_str());

        true
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.lock().await.len()
    }
}
