//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! 認証不要。ロードバランサーやコンテナオーケストレーターの死活確認に使う。

use axum::Json;
use ridesharing_shared::HealthResponse;

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
