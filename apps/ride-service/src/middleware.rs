//! # 認証ミドルウェア
//!
//! `x-access-token` ヘッダのトークンを呼び出し元のユーザー ID に解決する。
//! 解決できたユーザーは [`CurrentUser`] としてリクエストの extension に格納され、
//! ハンドラは `Extension<CurrentUser>` で受け取る。
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/api/v1/rides", get(list_offers))
//!     .route_layer(from_fn_with_state(auth_state, require_access_token))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use ridesharing_domain::user::UserId;
use ridesharing_infra::AccessTokenStore;
use ridesharing_shared::event_log::error;

use crate::error::CoreError;

/// アクセストークンのヘッダ名
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// 認証ミドルウェアの状態
#[derive(Clone)]
pub struct AuthState {
    pub access_tokens: Arc<dyn AccessTokenStore>,
}

/// 認証済みの呼び出し元
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// 認証ミドルウェア
///
/// トークンがない、または解決できない場合は 401 Unauthorized を返す。
pub async fn require_access_token(
    State(state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, CoreError> {
    let token = request
        .headers()
        .get(ACCESS_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(CoreError::Unauthorized)?;

    let user_id = state
        .access_tokens
        .resolve(token)
        .await
        .map_err(|e| {
            tracing::error!(
                error.category = error::category::INFRASTRUCTURE,
                error.kind = error::kind::ACCESS_TOKEN,
                "アクセストークンの解決に失敗: {}",
                e
            );
            CoreError::Database(e)
        })?
        .ok_or(CoreError::Unauthorized)?;

    tracing::Span::current().record("user_id", tracing::field::display(&user_id));
    request.extensions_mut().insert(CurrentUser(user_id));

    Ok(next.run(request).await)
}
