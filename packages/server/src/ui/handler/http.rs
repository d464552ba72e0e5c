//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{JoinRequest, JoinResponse, RoomDetailDto, UploadResponse},
    ui::state::AppState,
    usecase::{JoinInput, UploadError},
};
use huddle_shared::time::timestamp_to_rfc3339;

use super::error::error_response;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Validate the join request and create or look up the room
pub async fn join(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinRequest>,
) -> Response {
    let input = JoinInput {
        username: request.username,
        room: request.room,
        create_new: request.create_new,
        room_name: request.room_name,
    };

    match state.join_room_usecase.execute(input).await {
        Ok(joined) => {
            let websocket = format!(
                "/ws?room={}&username={}",
                urlencoding::encode(joined.room.code.as_str()),
                urlencoding::encode(joined.username.as_str())
            );
            Json(JoinResponse {
                success: true,
                room: joined.room.code.to_string(),
                display_name: joined.room.display_name.to_string(),
                websocket,
            })
            .into_response()
        }
        Err(e) => {
            tracing::debug!("Join rejected: {}", e);
            e.into_response()
        }
    }
}

/// Encode the `file` part of a multipart body as a data URL attachment
pub async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return UploadError::NoFile.into_response(),
            Err(e) => {
                tracing::warn!("Failed to read multipart body: {}", e);
                return multipart_error(e.status(), e.body_text());
            }
        };
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Failed to read uploaded file '{}': {}", filename, e);
                return multipart_error(e.status(), e.body_text());
            }
        };

        return match state.upload_file_usecase.execute(&filename, &bytes) {
            Ok(attachment) => Json(UploadResponse {
                success: true,
                filename: attachment.original_name.clone(),
                original_name: attachment.original_name,
                file_type: attachment.kind.as_str().to_string(),
                file_url: attachment.url,
            })
            .into_response(),
            Err(e) => {
                tracing::debug!("Upload '{}' rejected: {}", filename, e);
                e.into_response()
            }
        };
    }
}

fn multipart_error(status: StatusCode, message: String) -> Response {
    let reason = if status == StatusCode::PAYLOAD_TOO_LARGE {
        "too_large"
    } else {
        "invalid_multipart"
    };
    error_response(status, reason, message)
}

/// Get room detail by code
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Response {
    match state.get_room_detail_usecase.execute(code).await {
        Ok(detail) => {
            // Domain Model から DTO への変換
            let room = detail.room;
            Json(RoomDetailDto {
                code: room.code.to_string(),
                display_name: room.display_name.to_string(),
                created_at: timestamp_to_rfc3339(room.created_at.value()),
                members: room.members.iter().map(|m| m.to_string()).collect(),
                message_count: detail.message_count,
            })
            .into_response()
        }
        Err(e) => e.into_response(),
    }
}
