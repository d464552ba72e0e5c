pub mod broadcast_hub;
pub mod connect_session;
pub mod error;
pub mod get_room_detail;
pub mod join_room;
pub mod upload_file;

pub use broadcast_hub::BroadcastHub;
pub use connect_session::ConnectSessionUseCase;
pub use error::{EventError, GetRoomDetailError, JoinError, UploadError};
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use join_room::{JoinInput, JoinRoomUseCase, JoinedRoom};
pub use upload_file::{UploadFileUseCase, UploadPolicy};
