//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{RoomEvent, Session},
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::JoinError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub room: String,
    pub username: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Session Binding と MessagePusher への登録は UseCase の中で行う
    let session = match state
        .connect_session_usecase
        .execute(query.username, query.room, tx)
        .await
    {
        Ok(session) => session,
        Err(e @ JoinError::RoomNotFound(_)) => {
            tracing::warn!("Rejecting WebSocket connection: {}", e);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            tracing::warn!("Rejecting WebSocket connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // アップロード上限のファイルを添付した message を受け取れるフレームサイズ
    let frame_limit = state.upload_file_usecase.policy().max_frame_bytes();

    // 登録済みのセッションは、アップグレードに失敗しても必ず解除する
    let hub = state.broadcast_hub.clone();
    let connection_id = session.connection_id.clone();
    Ok(ws
        .max_frame_size(frame_limit)
        .max_message_size(frame_limit)
        .on_failed_upgrade(move |e| {
            tracing::warn!("WebSocket upgrade failed for '{}': {}", connection_id, e);
            tokio::spawn(async move {
                hub.dispatch(&connection_id, RoomEvent::Disconnect).await;
            });
        })
        .on_upgrade(move |socket| handle_socket(socket, state, session, rx)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The channel closes when the pusher unregisters this connection, which ends the task.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: Session,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();
    let connection_id = session.connection_id.clone();

    let hub = state.broadcast_hub.clone();
    let recv_connection_id = connection_id.clone();

    // Events of one connection are dispatched one at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => {
                        hub.dispatch(&recv_connection_id, RoomEvent::from(event))
                            .await;
                    }
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring unparseable frame from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                },
                Message::Close(_) => {
                    tracing::debug!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!(
        "Connection '{}' of '{}' closed",
        connection_id,
        session.username
    );
    state
        .broadcast_hub
        .dispatch(&connection_id, RoomEvent::Disconnect)
        .await;
}
