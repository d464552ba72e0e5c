//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    ConnectionId, DisplayName, RepositoryError, Room, RoomCode, RoomLock, RoomState, Session,
    SessionError, Timestamp,
};

/// Room Registry
///
/// ルームの存在とメタデータを所有します。ルームごとに独立したロックを持ち、
/// 無関係なルーム同士が互いを待つことはありません。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成（同じコードが既に存在する場合は `AlreadyExists`）
    async fn create_room(
        &self,
        code: RoomCode,
        display_name: DisplayName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError>;

    /// ルームのスナップショットを取得
    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError>;

    /// 表示名を変更し、変更後のスナップショットを返す
    async fn rename_room(
        &self,
        code: &RoomCode,
        display_name: DisplayName,
    ) -> Result<Room, RepositoryError>;

    /// ルームの排他ロックを取得
    ///
    /// ロックを保持している間、そのルームの状態変更とブロードキャストは直列化されます。
    async fn lock_room(&self, code: &RoomCode) -> Result<RoomLock, RepositoryError>;

    /// メンバーが空ならルームとそのメッセージ履歴を破棄する（冪等）
    ///
    /// 呼び出し側が `room` のロックを保持していることが前提です。
    /// 破棄した場合は `true` を返します。
    async fn destroy_room_if_empty(&self, room: &mut RoomState) -> bool;

    /// 登録されているルーム数
    async fn count_rooms(&self) -> usize;
}

/// Session Binding
///
/// 接続 ID からユーザー名とルームを引くための弱い対応表。所有関係は持ちません。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// セッションを登録（同じ接続 ID の既存セッションは上書きされ、戻り値で返る）
    async fn bind(&self, session: Session) -> Option<Session>;

    /// 接続 ID に対応するセッションを取得
    async fn resolve(&self, connection_id: &ConnectionId) -> Result<Session, SessionError>;

    /// セッションを削除し、削除したセッションを返す（二度目以降は `None`）
    async fn unbind(&self, connection_id: &ConnectionId) -> Option<Session>;
}
