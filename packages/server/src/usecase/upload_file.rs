//! UseCase: ファイルのアップロード
//!
//! 受け取ったファイルを base64 の data URL に変換し、メッセージに添付できる
//! [`FileAttachment`] を返します。ファイルはサーバーに保存されません。

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::domain::{FileAttachment, FileKind};

use super::error::UploadError;

/// 既定の最大サイズ（48 MiB）
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 48 * 1024 * 1024;

/// data URL 以外のフレーム内容（イベント JSON、本文、ファイル名）の余裕分
pub const FRAME_ENVELOPE_BYTES: usize = 256 * 1024;

/// 既定で許可する拡張子
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 14] = [
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "mp4",
    "mp3",
];

/// アップロードの受け入れ条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    /// 上限サイズのファイルを添付した `message` フレームが収まる WebSocket フレームサイズ
    ///
    /// base64 は 3 バイトごとに 4 文字になる。
    pub fn max_frame_bytes(&self) -> usize {
        self.max_bytes
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(FRAME_ENVELOPE_BYTES)
    }

    /// 許可されていればファイル名の拡張子（小文字）を返す
    pub fn allowed_extension(&self, filename: &str) -> Option<String> {
        let (_, extension) = filename.rsplit_once('.')?;
        let extension = extension.to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|allowed| *allowed == extension)
            .then_some(extension)
    }
}

pub struct UploadFileUseCase {
    policy: UploadPolicy,
}

impl UploadFileUseCase {
    pub fn new(policy: UploadPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn execute(&self, filename: &str, bytes: &[u8]) -> Result<FileAttachment, UploadError> {
        if filename.is_empty() {
            return Err(UploadError::EmptyFileName);
        }
        let extension = self
            .policy
            .allowed_extension(filename)
            .ok_or(UploadError::ExtensionNotAllowed)?;
        if bytes.len() > self.policy.max_bytes {
            return Err(UploadError::TooLarge {
                max: self.policy.max_bytes,
                actual: bytes.len(),
            });
        }

        let kind = FileKind::from_extension(&extension);
        let media_type = match kind {
            FileKind::Image => "image",
            FileKind::Document => "application",
        };
        let url = format!(
            "data:{}/{};base64,{}",
            media_type,
            extension,
            STANDARD.encode(bytes)
        );

        tracing::debug!(
            "Encoded upload '{}' ({} bytes) as {}",
            filename,
            bytes.len(),
            kind.as_str()
        );

        Ok(FileAttachment {
            original_name: filename.to_string(),
            kind,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_becomes_image_data_url() {
        // テスト項目: 画像は data:image/<ext> の URL になる
        // given (前提条件):
        let usecase = UploadFileUseCase::new(UploadPolicy::default());

        // when (操作):
        let attachment = usecase.execute("cat.PNG", b"abc").unwrap();

        // then (期待する結果):
        assert_eq!(attachment.original_name, "cat.PNG");
        assert_eq!(attachment.kind, FileKind::Image);
        assert_eq!(attachment.url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_document_becomes_application_data_url() {
        // テスト項目: 画像以外は data:application/<ext> の URL になる
        // given (前提条件):
        let usecase = UploadFileUseCase::new(UploadPolicy::default());

        // when (操作):
        let attachment = usecase.execute("notes.pdf", b"hello").unwrap();

        // then (期待する結果):
        assert_eq!(attachment.kind, FileKind::Document);
        assert_eq!(attachment.url, "data:application/pdf;base64,aGVsbG8=");
    }

    #[test]
    fn test_rejects_disallowed_or_missing_extension() {
        // テスト項目: 許可されていない拡張子や拡張子なしは拒否される
        // given (前提条件):
        let usecase = UploadFileUseCase::new(UploadPolicy::default());

        // when (操作):
        let exe = usecase.execute("setup.exe", b"x");
        let bare = usecase.execute("README", b"x");

        // then (期待する結果):
        assert_eq!(exe, Err(UploadError::ExtensionNotAllowed));
        assert_eq!(bare, Err(UploadError::ExtensionNotAllowed));
    }

    #[test]
    fn test_rejects_empty_filename() {
        // テスト項目: ファイル名が空なら EmptyFileName
        // given (前提条件):
        let usecase = UploadFileUseCase::new(UploadPolicy::default());

        // when (操作):
        let result = usecase.execute("", b"x");

        // then (期待する結果):
        assert_eq!(result, Err(UploadError::EmptyFileName));
    }

    #[test]
    fn test_frame_limit_fits_largest_data_url() {
        // テスト項目: 上限サイズのファイルの data URL がフレーム上限に収まる
        // given (前提条件):
        let policy = UploadPolicy::with_max_bytes(3001);
        let usecase = UploadFileUseCase::new(policy.clone());

        // when (操作):
        let attachment = usecase.execute("notes.txt", &[b'a'; 3001]).unwrap();

        // then (期待する結果):
        assert_eq!(policy.max_frame_bytes(), 4004 + FRAME_ENVELOPE_BYTES);
        assert!(attachment.url.len() + 1024 < policy.max_frame_bytes());
    }

    #[test]
    fn test_rejects_oversized_file() {
        // テスト項目: 上限を超えるファイルは TooLarge
        // given (前提条件):
        let usecase = UploadFileUseCase::new(UploadPolicy::with_max_bytes(4));

        // when (操作):
        let result = usecase.execute("notes.txt", b"12345");

        // then (期待する結果):
        assert_eq!(result, Err(UploadError::TooLarge { max: 4, actual: 5 }));
    }
}
