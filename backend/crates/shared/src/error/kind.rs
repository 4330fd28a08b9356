//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to RPC status codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// RPC ステータスコードに対応するエラー分類を定義します。
/// 名前は gRPC のステータスコード体系に準拠し、
/// HTTP トランスポート上では対応する HTTP ステータスにマッピングされます。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.as_str(), "NOT_FOUND");
/// assert_eq!(kind.http_status(), 404);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Invalid Argument: 引数が不正、または必須項目が欠落
    InvalidArgument,
    /// Deadline Exceeded: 処理が期限内に完了しなかった
    DeadlineExceeded,
    /// Not Found: リソースが見つからない
    NotFound,
    /// Already Exists: 作成しようとしたリソースが既に存在する
    AlreadyExists,
    /// Internal: サーバー内部エラー
    Internal,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// RPC を HTTP 上で提供する際のステータスコード対応表です。
    #[inline]
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorKind::InvalidArgument => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::AlreadyExists => 409,
            ErrorKind::Internal => 500,
            ErrorKind::DeadlineExceeded => 504,
        }
    }

    /// ワイヤ上の文字列表現を取得
    ///
    /// ## Returns
    /// `SCREAMING_SNAKE_CASE` のステータス名（serde 表現と一致）
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::AlreadyExists.as_str(), "ALREADY_EXISTS");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::DeadlineExceeded => "DEADLINE_EXCEEDED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyExists => "ALREADY_EXISTS",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
