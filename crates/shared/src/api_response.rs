//! # API レスポンスエンベロープ
//!
//! 成功レスポンスの形式 `{ "status": true, "message"?: ..., <payload> }` を提供する。
//!
//! ペイロードはトップレベルに展開される。`{ "rides": [...] }` を表す構造体を
//! 渡すと `{ "status": true, "rides": [...] }` になる。

use serde::Serialize;

/// 成功レスポンス型
///
/// ## 使用例
///
/// ```
/// use ridesharing_shared::ApiResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Greeting {
///     greeting: &'static str,
/// }
///
/// let response = ApiResponse::new(Greeting { greeting: "hello" });
/// assert!(response.status);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    pub status:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data:    T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self {
            status: true,
            message: None,
            data,
        }
    }

    /// メッセージ付きの `ApiResponse` を作成する
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: true,
            message: Some(message.into()),
            data,
        }
    }
}
