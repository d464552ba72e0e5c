//! Value Objects
//!
//! 入力値の検証を生成時に一度だけ行い、以降は検証済みであることを型で保証します。

use std::fmt;

use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a username (in characters)
pub const USERNAME_MAX_LEN: usize = 32;
/// Maximum length of a room code (in characters)
pub const ROOM_CODE_MAX_LEN: usize = 64;
/// Maximum length of a room display name (in characters)
pub const DISPLAY_NAME_MAX_LEN: usize = 100;
/// Maximum length of a message body (in characters)
pub const MESSAGE_TEXT_MAX_LEN: usize = 10_000;

fn validated(
    field: &'static str,
    value: String,
    max_len: usize,
) -> Result<String, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    let len = trimmed.chars().count();
    if len > max_len {
        return Err(ValueObjectError::TooLong {
            field,
            max: max_len,
            actual: len,
        });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

macro_rules! string_value_object {
    ($(#[$meta:meta])* $name:ident, $field:literal, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap the given value (surrounding whitespace is trimmed)
            pub fn new(value: String) -> Result<Self, ValueObjectError> {
                validated($field, value, $max).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValueObjectError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_value_object!(
    /// Name a user chose at the join step. Unique only within a room's member list.
    Username,
    "username",
    USERNAME_MAX_LEN
);

string_value_object!(
    /// Externally chosen code that identifies a room.
    RoomCode,
    "room code",
    ROOM_CODE_MAX_LEN
);

string_value_object!(
    /// Human-readable room name, mutable through `update_room_info`.
    DisplayName,
    "display name",
    DISPLAY_NAME_MAX_LEN
);

string_value_object!(
    /// Body of a text message.
    MessageText,
    "message text",
    MESSAGE_TEXT_MAX_LEN
);

/// Identity of one live WebSocket connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh, random connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_valid_value() {
        // テスト項目: 有効なユーザー名が受け入れられる
        // given (前提条件):
        let value = "alice".to_string();

        // when (操作):
        let result = Username::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "alice");
    }

    #[test]
    fn test_username_trims_surrounding_whitespace() {
        // テスト項目: 前後の空白が取り除かれる
        // given (前提条件):
        let value = "  bob ".to_string();

        // when (操作):
        let result = Username::try_from(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "bob");
    }

    #[test]
    fn test_room_code_rejects_blank_value() {
        // テスト項目: 空白のみのルームコードは拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = RoomCode::new(value);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::Empty("room code")));
    }

    #[test]
    fn test_display_name_rejects_too_long_value() {
        // テスト項目: 上限を超える表示名は拒否される
        // given (前提条件):
        let value = "x".repeat(DISPLAY_NAME_MAX_LEN + 1);

        // when (操作):
        let result = DisplayName::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooLong {
                field: "display name",
                max: DISPLAY_NAME_MAX_LEN,
                actual: DISPLAY_NAME_MAX_LEN + 1,
            })
        );
    }

    #[test]
    fn test_message_text_length_is_counted_in_characters() {
        // テスト項目: 文字数はバイト数ではなく文字単位で数えられる
        // given (前提条件):
        let value = "あ".repeat(MESSAGE_TEXT_MAX_LEN);

        // when (操作):
        let result = MessageText::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される接続 ID は毎回異なる
        // given (前提条件):

        // when (操作):
        let first = ConnectionId::generate();
        let second = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }
}
