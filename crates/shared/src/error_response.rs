//! # エラーレスポンス
//!
//! 失敗レスポンスの形式 `{ "status": false, "message"?, "errors"?, "error"? }` を提供する。
//!
//! - `message`: 利用者向けの説明（"Invalid Ride ID" など）
//! - `errors`: フィールドごとの理由マップ（入力検証エラーのみ）
//! - `error`: 短いエラー名（"Unauthorized" など）
//!
//! axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）。

use serde::Serialize;

/// エラーレスポンス
///
/// `E` は `errors` フィールドの型。フィールドマップを持たない場合は `()`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse<E = ()> {
    pub status:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors:  Option<E>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:   Option<String>,
}

impl ErrorResponse {
    /// `message` のみを持つエラーレスポンス
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status:  false,
            message: Some(message.into()),
            errors:  None,
            error:   None,
        }
    }

    /// `error` のみを持つエラーレスポンス
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            status:  false,
            message: None,
            errors:  None,
            error:   Some(error.into()),
        }
    }
}

impl<E> ErrorResponse<E> {
    /// `message` とフィールドマップを持つエラーレスポンス
    pub fn with_errors(message: impl Into<String>, errors: E) -> Self {
        Self {
            status:  false,
            message: Some(message.into()),
            errors:  Some(errors),
            error:   None,
        }
    }
}
