//! Mapping of boundary errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::ErrorResponse,
    usecase::{GetRoomDetailError, JoinError, UploadError},
};

pub(super) fn error_response(status: StatusCode, reason: &str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: reason.to_string(),
            message,
        }),
    )
        .into_response()
}

impl JoinError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            JoinError::MissingFields | JoinError::InvalidField(_) => StatusCode::BAD_REQUEST,
            JoinError::RoomExists(_) => StatusCode::CONFLICT,
            JoinError::RoomNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for JoinError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.reason(), self.to_string())
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match self {
            UploadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        error_response(status, self.reason(), self.to_string())
    }
}

impl IntoResponse for GetRoomDetailError {
    fn into_response(self) -> Response {
        match self {
            GetRoomDetailError::RoomNotFound => {
                error_response(StatusCode::NOT_FOUND, "room_not_found", self.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomCode;

    #[test]
    fn test_join_error_status_codes() {
        let code = RoomCode::new("abc123".to_string()).unwrap();

        assert_eq!(JoinError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            JoinError::RoomExists(code.clone()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            JoinError::RoomNotFound(code).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_upload_too_large_is_413() {
        let response = UploadError::TooLarge { max: 1, actual: 2 }.into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
