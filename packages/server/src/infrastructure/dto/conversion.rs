//! Conversion logic between DTOs and domain types.

use crate::domain::{ChatMessage, FileAttachment, FileKind, RoomEvent};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl From<dto::FileTypeDto> for FileKind {
    fn from(dto: dto::FileTypeDto) -> Self {
        match dto {
            dto::FileTypeDto::Image => FileKind::Image,
            dto::FileTypeDto::Document => FileKind::Document,
        }
    }
}

impl From<dto::FileAttachmentDto> for FileAttachment {
    fn from(dto: dto::FileAttachmentDto) -> Self {
        Self {
            original_name: dto.original_name,
            kind: dto.file_type.into(),
            url: dto.url,
        }
    }
}

impl From<dto::ClientEvent> for RoomEvent {
    fn from(dto: dto::ClientEvent) -> Self {
        match dto {
            dto::ClientEvent::JoinRoom => RoomEvent::JoinRoom,
            dto::ClientEvent::LeaveRoom => RoomEvent::LeaveRoom,
            dto::ClientEvent::Message { text, attachment } => RoomEvent::Message {
                text,
                attachment: attachment.map(Into::into),
            },
            dto::ClientEvent::UpdateRoomInfo { display_name } => {
                RoomEvent::UpdateRoomInfo { display_name }
            }
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<FileKind> for dto::FileTypeDto {
    fn from(kind: FileKind) -> Self {
        match kind {
            FileKind::Image => dto::FileTypeDto::Image,
            FileKind::Document => dto::FileTypeDto::Document,
        }
    }
}

impl From<FileAttachment> for dto::FileAttachmentDto {
    fn from(model: FileAttachment) -> Self {
        Self {
            original_name: model.original_name,
            file_type: model.kind.into(),
            url: model.url,
        }
    }
}

impl From<ChatMessage> for dto::MessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            author: model.author.into_string(),
            text: model.text.map(|t| t.into_string()),
            attachment: model.attachment.map(Into::into),
            sent_at: model.sent_at.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, Timestamp, Username};

    #[test]
    fn test_client_message_event_to_domain() {
        // テスト項目: message フレームがドメインのイベントに変換される
        // given (前提条件):
        let frame = dto::ClientEvent::Message {
            text: Some("hi".to_string()),
            attachment: Some(dto::FileAttachmentDto {
                original_name: "notes.pdf".to_string(),
                file_type: dto::FileTypeDto::Document,
                url: "data:application/pdf;base64,AAAA".to_string(),
            }),
        };

        // when (操作):
        let event: RoomEvent = frame.into();

        // then (期待する結果):
        assert_eq!(
            event,
            RoomEvent::Message {
                text: Some("hi".to_string()),
                attachment: Some(FileAttachment {
                    original_name: "notes.pdf".to_string(),
                    kind: FileKind::Document,
                    url: "data:application/pdf;base64,AAAA".to_string(),
                }),
            }
        );
    }

    #[test]
    fn test_domain_chat_message_to_dto() {
        // テスト項目: ドメインの ChatMessage が DTO に変換される
        // given (前提条件):
        let message = ChatMessage {
            author: Username::new("bob".to_string()).unwrap(),
            text: Some(MessageText::new("Hi!".to_string()).unwrap()),
            attachment: None,
            sent_at: Timestamp::new(2000),
        };

        // when (操作):
        let dto_msg: dto::MessageDto = message.into();

        // then (期待する結果):
        assert_eq!(dto_msg.author, "bob");
        assert_eq!(dto_msg.text.as_deref(), Some("Hi!"));
        assert_eq!(dto_msg.attachment, None);
        assert_eq!(dto_msg.sent_at, 2000);
    }
}
