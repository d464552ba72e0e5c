//! HTTP API request/response bodies.

use serde::{Deserialize, Serialize};

/// `POST /api/join` request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinRequest {
    pub username: Option<String>,
    pub room: Option<String>,
    #[serde(default)]
    pub create_new: bool,
    pub room_name: Option<String>,
}

/// `POST /api/join` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinResponse {
    pub success: bool,
    pub room: String,
    pub display_name: String,
    /// Path (with query) the client connects its WebSocket to
    pub websocket: String,
}

/// Error body shared by the HTTP endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable reason code
    pub error: String,
    pub message: String,
}

/// `POST /api/upload` success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    pub original_name: String,
    pub file_type: String,
    pub file_url: String,
}

/// `GET /api/rooms/{code}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub code: String,
    pub display_name: String,
    pub created_at: String,
    pub members: Vec<String>,
    pub message_count: usize,
}
