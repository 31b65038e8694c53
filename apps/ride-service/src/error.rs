//! # Ride Service エラー定義
//!
//! ユースケースが返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | HTTP ステータス | レスポンス |
//! |-----------|----------------|-----------|
//! | `Validation` | 400 | `message` + `errors` |
//! | `MalformedPayload` | 400 | `message` |
//! | `InvalidIdentifier` / `InvalidAction` / `BadRequest` | 400 | `error` |
//! | `Unauthorized` | 401 | `error: "Unauthorized"` |
//! | `Forbidden` | 403 | `error` |
//! | `NotFound` / `RequestNotFound` | 404 | `error` |
//! | `Conflict` | 409 | `error` |
//! | `DomainRule` / `Database` / `Internal` | 500 | `error`（詳細はログのみ） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ridesharing_domain::ride::ValidationErrors;
use ridesharing_infra::InfraError;
use ridesharing_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

/// 利用者向けのメッセージ
pub mod message {
    pub const INVALID_DATA: &str = "You submitted Invalid Data!";
    pub const INVALID_RIDE_ID: &str = "Invalid Ride ID";
    pub const INVALID_RIDE_OR_REQUEST_ID: &str = "Invalid Ride or Request ID";
    pub const INVALID_UPDATE_ACTION: &str = "Invalid update action";
    pub const NO_REQUEST_FOUND: &str = "No Request Found!";
    pub const REQUEST_NOT_FOUND: &str = "Request Not Found";
    pub const RIDE_NOT_FOUND: &str = "Ride Not Found";
    pub const CANNOT_REQUEST_OWN_RIDE: &str = "You cannot request your own ride";
    pub const ALREADY_REQUESTED: &str = "You have already requested this ride";
    pub const REQUEST_ALREADY_PROCESSED: &str = "Request has already been processed";
    pub const NOT_RIDE_OWNER: &str = "You do not own this ride";
    pub const UNAUTHORIZED: &str = "Unauthorized";
    pub const RIDE_NOT_SAVED: &str = "Ride offer could not be saved";
    pub const INTERNAL_ERROR: &str = "Internal Server Error";
}

/// Ride Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// 必須フィールドの欠落
    #[error("入力検証エラー: {0}")]
    Validation(ValidationErrors),

    /// ボディが JSON オブジェクトでもフォームでもない、または値の型が合わない
    #[error("ペイロードを解釈できません: {0}")]
    MalformedPayload(String),

    /// ID が正準形式の正整数でない
    #[error("不正な ID: {0}")]
    InvalidIdentifier(String),

    /// 更新アクションが `accept` / `reject` 以外
    #[error("不正なアクション: {0}")]
    InvalidAction(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// アクセストークンがない、または解決できない
    #[error("認証されていません")]
    Unauthorized,

    /// 権限不足
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// ライドが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// ライド配下にリクエストが見つからない
    #[error("乗車リクエストが見つかりません: {0}")]
    RequestNotFound(String),

    /// 競合（二重リクエスト、処理済みリクエストの再遷移）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// ストア側のルール違反
    #[error("ルール違反: {0}")]
    DomainRule(String),

    /// データベース・Redis エラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            CoreError::Validation(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::with_errors(message::INVALID_DATA, errors)),
                )
                    .into_response();
            }
            CoreError::MalformedPayload(detail) => {
                tracing::debug!("ペイロードを解釈できません: {}", detail);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::with_message(message::INVALID_DATA)),
                )
                    .into_response();
            }
            CoreError::InvalidIdentifier(msg)
            | CoreError::InvalidAction(msg)
            | CoreError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            CoreError::Unauthorized => (StatusCode::UNAUTHORIZED, message::UNAUTHORIZED.to_string()),
            CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            CoreError::NotFound(msg) | CoreError::RequestNotFound(msg) => {
                (StatusCode::NOT_FOUND, msg)
            }
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            CoreError::DomainRule(reason) => {
                tracing::error!(
                    error.category = error::category::DOMAIN_RULE,
                    error.kind = error::kind::RULE_VIOLATION,
                    "ルール違反: {}",
                    reason
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message::RIDE_NOT_SAVED.to_string(),
                )
            }
            CoreError::Database(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message::INTERNAL_ERROR.to_string(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message::INTERNAL_ERROR.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::with_error(error_message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use ridesharing_domain::ride::{RideOfferPayload, validate_ride_offer};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn into_parts(error: CoreError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_入力検証エラーはmessageとerrorsを返す() {
        let errors = validate_ride_offer(&RideOfferPayload::default()).unwrap_err();

        let (status, body) = into_parts(CoreError::Validation(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], json!(false));
        assert_eq!(body["message"], json!("You submitted Invalid Data!"));
        assert_eq!(
            body["errors"]["destination"],
            json!("destination is required")
        );
    }

    #[tokio::test]
    async fn test_解釈できないペイロードはmessageのみを返す() {
        let (status, body) =
            into_parts(CoreError::MalformedPayload("expected value".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "status": false, "message": "You submitted Invalid Data!" })
        );
    }

    #[rstest]
    #[case(CoreError::InvalidIdentifier(message::INVALID_RIDE_ID.into()), StatusCode::BAD_REQUEST, "Invalid Ride ID")]
    #[case(CoreError::InvalidAction(message::INVALID_UPDATE_ACTION.into()), StatusCode::BAD_REQUEST, "Invalid update action")]
    #[case(CoreError::Unauthorized, StatusCode::UNAUTHORIZED, "Unauthorized")]
    #[case(CoreError::Forbidden(message::NOT_RIDE_OWNER.into()), StatusCode::FORBIDDEN, "You do not own this ride")]
    #[case(CoreError::NotFound(message::NO_REQUEST_FOUND.into()), StatusCode::NOT_FOUND, "No Request Found!")]
    #[case(CoreError::RequestNotFound(message::REQUEST_NOT_FOUND.into()), StatusCode::NOT_FOUND, "Request Not Found")]
    #[case(CoreError::Conflict(message::ALREADY_REQUESTED.into()), StatusCode::CONFLICT, "You have already requested this ride")]
    #[case(CoreError::DomainRule("目的地が長すぎます".into()), StatusCode::INTERNAL_SERVER_ERROR, "Ride offer could not be saved")]
    #[case(CoreError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")]
    #[tokio::test]
    async fn test_単一メッセージのエラーはerrorフィールドで返す(
        #[case] error: CoreError,
        #[case] expected_status: StatusCode,
        #[case] expected_error: &str,
    ) {
        let (status, body) = into_parts(error).await;

        assert_eq!(status, expected_status);
        assert_eq!(body, json!({ "status": false, "error": expected_error }));
    }

    #[tokio::test]
    async fn test_インフラエラーの詳細はレスポンスに含めない() {
        let (status, body) = into_parts(CoreError::Database(InfraError::unexpected(
            "connection refused",
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], json!("Internal Server Error"));
    }
}
