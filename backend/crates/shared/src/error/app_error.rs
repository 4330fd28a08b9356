//! Application Error - Unified error type for the wire boundary
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// RPC 境界で返却する標準エラー型です。
/// ワイヤに出るのは `kind` と `message` のみです。
/// 内部の詳細は変換前にログへ出力し、ここには持ち込みません。
///
/// ## Fields
/// * `kind` - エラーの分類（RPC ステータスコードにマッピング）
/// * `message` - 呼び出し元向けのエラーメッセージ
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::NotFound, "user not found");
/// assert_eq!(err.http_status(), 404);
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug)]
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// 呼び出し元向けメッセージ
    message: Cow<'static, str>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 新しいエラーを作成
    ///
    /// ## Arguments
    /// * `kind` - エラー種別
    /// * `message` - 呼び出し元向けメッセージ
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// NOT_FOUND エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}
