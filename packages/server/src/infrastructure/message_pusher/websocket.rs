//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! WebSocket 自体は UI 層（`ui/handler/websocket.rs`）が保持し、
//! チャンネルの受信側から実際のソケットへ書き出します。
//! ここでの送信はチャンネルへの投入だけなので、I/O を待つことはありません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続 ID → 送信チャンネル
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.clone()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);

        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // 切断済みの受信者には届かなくてよい（再送もキューイングもしない）
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::debug!(
                        "Connection '{}' not registered during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast: 複数接続への送信と、未登録・切断済み接続の許容
    // - unregister 後は送信対象にならないこと
    // ========================================

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::from("c1");
        pusher.register_client(id.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&id, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 未登録の接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&ConnectionId::from("ghost"), "Hello").await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound(ConnectionId::from("ghost")))
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_channel_fails() {
        // テスト項目: 受信側が閉じた接続への送信は PushFailed
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::from("c1");
        pusher.register_client(id.clone(), tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&id, "Hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_missing_and_closed_targets() {
        // テスト項目: 未登録・切断済みの接続が混ざっていても他には届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::from("c1"), tx1).await;
        pusher.register_client(ConnectionId::from("c2"), tx2).await;
        pusher.register_client(ConnectionId::from("c3"), tx3).await;
        drop(rx2);

        // when (操作):
        let targets = vec![
            ConnectionId::from("c1"),
            ConnectionId::from("c2"),
            ConnectionId::from("ghost"),
            ConnectionId::from("c3"),
        ];
        let result = pusher.broadcast(targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx3.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        // テスト項目: 登録解除した接続には配信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::from("c1");
        pusher.register_client(id.clone(), tx).await;

        // when (操作):
        pusher.unregister_client(&id).await;
        pusher.broadcast(vec![id.clone()], "Message").await.unwrap();

        // then (期待する結果): 送信チャンネルが破棄され、何も届かない
        assert_eq!(rx.recv().await, None);
        assert_eq!(pusher.count_clients().await, 0);
    }
}
