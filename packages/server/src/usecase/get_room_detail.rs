//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository};

use super::error::GetRoomDetailError;

/// ルームと、その時点のメッセージ件数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: Room,
    pub message_count: usize,
}

pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, code: String) -> Result<RoomDetail, GetRoomDetailError> {
        let code = RoomCode::new(code).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let room = self
            .repository
            .lock_room(&code)
            .await
            .map_err(|_| GetRoomDetailError::RoomNotFound)?;

        Ok(RoomDetail {
            room: room.room().clone(),
            message_count: room.message_count(),
        })
    }
}
