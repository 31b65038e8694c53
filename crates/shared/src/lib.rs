//! # RideSharing 共有ユーティリティ
//!
//! 全クレートで使用される、ビジネスロジックを含まないユーティリティ。
//!
//! - [`ApiResponse`] / [`ErrorResponse`]: `{ "status": bool, ... }` 形式のレスポンスエンベロープ
//! - [`HealthResponse`]: ヘルスチェックレスポンス
//! - [`observability`]: トレーシング初期化
//! - [`event_log`]: ビジネスイベントの構造化ログ

pub mod api_response;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
