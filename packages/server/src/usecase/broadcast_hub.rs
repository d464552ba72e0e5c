//! Broadcast Hub: the single entry point for room events.
//!
//! Every inbound event of a connection goes through [`BroadcastHub::dispatch`].
//! The hub resolves the connection's session, takes the room's lock, mutates
//! presence / history / metadata and fans the resulting notifications out to
//! the room's subscribers before releasing the lock. A history snapshot sent
//! to a joiner and the broadcast of a concurrently sent message are therefore
//! never observed out of order.
//!
//! ## 処理の対応表
//!
//! | イベント | 状態変更 | 送信 |
//! |---|---|---|
//! | `join_room` | メンバー追加・購読 | ルームへ `user_join`、本人へ `message_history` |
//! | `leave_room` | 購読解除・メンバー削除 | 初回の退出のみルームへ `user_leave` |
//! | `message` | 履歴に追加 | ルーム（送信者を含む）へ `message` |
//! | `update_room_info` | 表示名の変更 | ルームへ `room_updated` |
//! | `disconnect` | セッション解除の後 `leave_room` と同じ | `leave_room` と同じ |

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::{
    domain::{
        ChatMessage, ConnectionId, DisplayName, FileAttachment, MessagePusher, MessageText,
        RoomEvent, RoomRepository, RoomState, Session, SessionError, SessionRepository,
        Timestamp, Username,
    },
    infrastructure::dto::websocket::ServerEvent,
};

use super::error::EventError;

pub struct BroadcastHub {
    room_repository: Arc<dyn RoomRepository>,
    session_repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl BroadcastHub {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        session_repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            session_repository,
            message_pusher,
            clock,
        }
    }

    /// Handle one inbound event. Never fails: anything that cannot be
    /// processed is logged and dropped.
    pub async fn dispatch(&self, connection_id: &ConnectionId, event: RoomEvent) {
        let name = event.name();
        match self.handle(connection_id, event).await {
            Ok(()) => {
                tracing::debug!("Handled '{}' from connection '{}'", name, connection_id);
            }
            Err(e @ (EventError::NoSession(_) | EventError::Room(_))) => {
                tracing::debug!(
                    "Ignored '{}' from connection '{}': {}",
                    name,
                    connection_id,
                    e
                );
            }
            Err(e) => {
                tracing::warn!(
                    "Dropped '{}' from connection '{}': {}",
                    name,
                    connection_id,
                    e
                );
            }
        }
    }

    /// Handle one inbound event and report why it had no effect, if it didn't.
    pub async fn handle(
        &self,
        connection_id: &ConnectionId,
        event: RoomEvent,
    ) -> Result<(), EventError> {
        if matches!(event, RoomEvent::Disconnect) {
            return self.disconnect(connection_id).await;
        }

        let session = self.session_repository.resolve(connection_id).await?;
        match event {
            RoomEvent::JoinRoom => self.join_room(&session).await,
            RoomEvent::LeaveRoom => self.leave_room(&session).await,
            RoomEvent::Message { text, attachment } => {
                self.send_message(&session, text, attachment).await
            }
            RoomEvent::UpdateRoomInfo { display_name } => {
                self.update_room_info(&session, display_name).await
            }
            RoomEvent::Disconnect => Ok(()),
        }
    }

    async fn join_room(&self, session: &Session) -> Result<(), EventError> {
        let mut room = self.room_repository.lock_room(&session.room_code).await?;

        room.join(&session.username);
        room.subscribe(session.connection_id.clone());
        tracing::info!(
            "'{}' joined room '{}' ({} members)",
            session.username,
            session.room_code,
            room.members().len()
        );

        let joined = ServerEvent::UserJoin {
            username: session.username.to_string(),
            members: member_names(room.members()),
            display_name: room.room().display_name.to_string(),
        };
        self.broadcast(&room, &joined).await?;

        let history = ServerEvent::MessageHistory {
            messages: room.history().into_iter().map(Into::into).collect(),
        };
        self.message_pusher
            .push_to(&session.connection_id, &encode(&history)?)
            .await?;

        Ok(())
    }

    async fn leave_room(&self, session: &Session) -> Result<(), EventError> {
        let mut room = self.room_repository.lock_room(&session.room_code).await?;

        room.unsubscribe(&session.connection_id);
        let announced = room.leave(&session.username);
        if announced {
            tracing::info!("'{}' left room '{}'", session.username, session.room_code);
            let left = ServerEvent::UserLeave {
                username: session.username.to_string(),
                members: member_names(room.members()),
            };
            self.broadcast(&room, &left).await?;
        }

        self.room_repository.destroy_room_if_empty(&mut room).await;

        Ok(())
    }

    async fn send_message(
        &self,
        session: &Session,
        text: Option<String>,
        attachment: Option<FileAttachment>,
    ) -> Result<(), EventError> {
        let text = text
            .filter(|t| !t.trim().is_empty())
            .map(MessageText::new)
            .transpose()
            .map_err(|e| EventError::InvalidPayload(e.to_string()))?;
        if text.is_none() && attachment.is_none() {
            return Err(EventError::InvalidPayload(
                "message needs text or an attachment".to_string(),
            ));
        }

        let mut room = self.room_repository.lock_room(&session.room_code).await?;

        let message = ChatMessage {
            author: session.username.clone(),
            text,
            attachment,
            sent_at: Timestamp::new(self.clock.now_millis()),
        };
        room.append_message(message.clone());

        self.broadcast(&room, &ServerEvent::Message(message.into()))
            .await
    }

    async fn update_room_info(
        &self,
        session: &Session,
        display_name: Option<String>,
    ) -> Result<(), EventError> {
        let display_name = display_name
            .map(DisplayName::new)
            .transpose()
            .map_err(|e| EventError::InvalidPayload(e.to_string()))?;

        let mut room = self.room_repository.lock_room(&session.room_code).await?;

        if let Some(display_name) = display_name {
            tracing::info!(
                "'{}' renamed room '{}' to '{}'",
                session.username,
                session.room_code,
                display_name
            );
            room.rename(display_name);
        }

        let updated = ServerEvent::RoomUpdated {
            display_name: room.room().display_name.to_string(),
        };
        self.broadcast(&room, &updated).await
    }

    async fn disconnect(&self, connection_id: &ConnectionId) -> Result<(), EventError> {
        // Taking the session out first makes repeated close signals no-ops
        let session = self.session_repository.unbind(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        let session = session.ok_or_else(|| SessionError::NoSession(connection_id.clone()))?;
        tracing::info!(
            "Connection '{}' of '{}' disconnected",
            connection_id,
            session.username
        );

        self.leave_room(&session).await
    }

    async fn broadcast(&self, room: &RoomState, event: &ServerEvent) -> Result<(), EventError> {
        let content = encode(event)?;
        self.message_pusher
            .broadcast(room.subscribers(), &content)
            .await?;
        Ok(())
    }
}

fn encode(event: &ServerEvent) -> Result<String, EventError> {
    serde_json::to_string(event).map_err(|e| EventError::Encode(e.to_string()))
}

fn member_names(members: &[Username]) -> Vec<String> {
    members.iter().map(ToString::to_string).collect()
}
