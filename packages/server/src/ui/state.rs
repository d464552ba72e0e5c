//! Shared application state.

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    usecase::{
        BroadcastHub, ConnectSessionUseCase, GetRoomDetailUseCase, JoinRoomUseCase,
        UploadFileUseCase, UploadPolicy,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（HTTP の join ステップ）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// ConnectSessionUseCase（WebSocket 接続とセッションの対応付け）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// UploadFileUseCase（ファイルの data URL 化）
    pub upload_file_usecase: Arc<UploadFileUseCase>,
    /// BroadcastHub（ルームイベントの処理）
    pub broadcast_hub: Arc<BroadcastHub>,
}

impl AppState {
    /// Wire every use case to the in-memory repositories and the WebSocket pusher
    ///
    /// Dependencies are created in order: repositories, pusher, use cases.
    pub fn in_memory(upload: UploadPolicy, clock: Arc<dyn Clock>) -> Self {
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let session_repository = Arc::new(InMemorySessionRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());

        Self {
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                room_repository.clone(),
                clock.clone(),
            )),
            connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
                room_repository.clone(),
                session_repository.clone(),
                message_pusher.clone(),
            )),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(room_repository.clone())),
            upload_file_usecase: Arc::new(UploadFileUseCase::new(upload)),
            broadcast_hub: Arc::new(BroadcastHub::new(
                room_repository,
                session_repository,
                message_pusher,
                clock,
            )),
        }
    }
}
