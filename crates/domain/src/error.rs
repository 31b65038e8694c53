//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## 設計方針
//!
//! - **型による分類**: エラーの種類を列挙型で明示し、パターンマッチで処理可能に
//! - **thiserror 活用**: `#[error(...)]` マクロでエラーメッセージを自動生成
//! - **HTTP ステータスへのマッピング**: API 層でステータスコードに変換可能
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 単一値の検証失敗 |
//! | `InvalidIdentifier` | 400 Bad Request | ID が正準形式の正整数でない |
//! | `InvalidAction` | 400 Bad Request | 更新アクションが `accept` / `reject` 以外 |
//! | `InvalidTransition` | 409 Conflict | 終端状態からの再遷移 |
//!
//! ライドオファー全体の入力検証はフィールドごとの理由をまとめて返す必要があるため、
//! 単一メッセージの `Validation` ではなく
//! [`ValidationErrors`](crate::ride::ValidationErrors) を使う。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// ビジネスロジックの実行中に発生する例外状態を表現する。
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// DB から復元した値が不正な場合など、単一の値の検証失敗に使用する。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 識別子の形式エラー
    ///
    /// 「存在しない」とは区別する。形式が正しければ存在確認に進む。
    #[error("{entity_type} の ID が不正です: {value:?}")]
    InvalidIdentifier {
        /// エンティティの種類（"Ride", "RideRequest"）
        entity_type: &'static str,
        /// 検証に失敗した生テキスト
        value:       String,
    },

    /// 更新アクションが列挙値に含まれない
    #[error("不正な更新アクション: {0:?}")]
    InvalidAction(Option<String>),

    /// 状態遷移エラー
    ///
    /// `accepted` / `rejected` は終端状態で、そこからの遷移は定義されない。
    #[error("{from} の乗車リクエストは {to} にできません")]
    InvalidTransition {
        /// 現在のステータス
        from: &'static str,
        /// 要求されたステータス
        to:   &'static str,
    },
}
