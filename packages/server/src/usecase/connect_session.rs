//! UseCase: WebSocket 接続とセッションの対応付け
//!
//! join ステップを通過した接続に ID を振り、Session Binding と
//! MessagePusher に登録します。以降のイベントはすべてこのセッションで解決されます。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PusherChannel, RoomCode, RoomRepository, Session,
    SessionRepository, Username,
};

use super::error::JoinError;

pub struct ConnectSessionUseCase {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            message_pusher,
        }
    }

    /// 接続を登録
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 新しい接続 ID に対応付けたセッション
    /// * `Err(JoinError)` - 入力が不正、またはルームが存在しない
    pub async fn execute(
        &self,
        username: String,
        room: String,
        sender: PusherChannel,
    ) -> Result<Session, JoinError> {
        let username = Username::new(username)?;
        let room_code = RoomCode::new(room)?;

        // 存在確認のみ。参加そのものは join_room イベントで行う
        self.room_repository
            .get_room(&room_code)
            .await
            .map_err(|_| JoinError::RoomNotFound(room_code.clone()))?;

        let session = Session {
            connection_id: ConnectionId::generate(),
            username,
            room_code,
        };
        self.session_repository.bind(session.clone()).await;
        self.message_pusher
            .register_client(session.connection_id.clone(), sender)
            .await;

        tracing::info!(
            "Connection '{}' opened for '{}' in room '{}'",
            session.connection_id,
            session.username,
            session.room_code
        );

        Ok(session)
    }
}
