//! # 乗車リクエスト API ハンドラ
//!
//! 乗客の参加リクエストと、ドライバーによる一覧参照・承諾・拒否を扱う。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use ridesharing_domain::ride::RideRequest;
use ridesharing_shared::ApiResponse;
use serde::Serialize;

use crate::{
    error::CoreError,
    middleware::CurrentUser,
    usecase::{RequestTransitionUseCaseImpl, RideRequestUseCaseImpl},
};

/// 乗車リクエスト API の共有状態
pub struct RideRequestState {
    pub usecase:    RideRequestUseCaseImpl,
    pub transition: RequestTransitionUseCaseImpl,
}

/// 乗車リクエスト DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestDto {
    pub id:           i64,
    pub ride_id:      i64,
    /// `pending` / `accepted` / `rejected`
    pub status:       String,
    pub requester_id: String,
    pub created_at:   String,
    pub updated_at:   String,
}

impl From<&RideRequest> for RideRequestDto {
    fn from(request: &RideRequest) -> Self {
        Self {
            id:           request.id().as_i64(),
            ride_id:      request.ride_id().as_i64(),
            status:       request.status().to_string(),
            requester_id: request.requester_id().to_string(),
            created_at:   request.created_at().to_rfc3339(),
            updated_at:   request.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RequestBody {
    pub request: RideRequestDto,
}

#[derive(Debug, Serialize)]
pub struct RequestsBody {
    pub requests: Vec<RideRequestDto>,
}

/// クエリ文字列から `action` の値を取り出す
///
/// 同じキーが複数ある場合は最初の値。`action[x]=y` のような形は `action` とみなさない。
fn extract_action(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "action")
        .map(|(_, value)| value.into_owned())
}

/// GET /api/v1/users/rides/{ride_id}/requests
///
/// ## レスポンス
///
/// - `200 OK`: リクエスト一覧（0 件なら空配列）
/// - `400 Bad Request`: ライド ID が正の整数でない
/// - `403 Forbidden`: 呼び出し元がライドの所有者でない
/// - `404 Not Found`: ライドが見つからない
#[tracing::instrument(skip_all, fields(%ride_id))]
pub async fn list_requests(
    State(state): State<Arc<RideRequestState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(ride_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let requests = state.usecase.list_requests(&ride_id, &user_id).await?;

    let response = ApiResponse::new(RequestsBody {
        requests: requests.iter().map(RideRequestDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/v1/rides/{ride_id}/requests
///
/// 呼び出し元を乗客としてライドに参加リクエストを送る。
#[tracing::instrument(skip_all, fields(%ride_id))]
pub async fn join_ride(
    State(state): State<Arc<RideRequestState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(ride_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let request = state.usecase.join_ride(&ride_id, user_id).await?;

    let response = ApiResponse::with_message(
        "Ride request sent",
        RequestBody {
            request: RideRequestDto::from(&request),
        },
    );
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /api/v1/users/rides/{ride_id}/requests/{request_id}?action=accept|reject
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のリクエスト
/// - `400 Bad Request`: アクションが不正 / ID が正の整数でない
/// - `403 Forbidden`: 呼び出し元がライドの所有者でない
/// - `404 Not Found`: ライド配下にリクエストが見つからない
/// - `409 Conflict`: 既に承諾・拒否済み
#[tracing::instrument(skip_all, fields(%ride_id, %request_id))]
pub async fn update_request(
    State(state): State<Arc<RideRequestState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path((ride_id, request_id)): Path<(String, String)>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, CoreError> {
    let action = extract_action(query.as_deref());

    let request = state
        .transition
        .update_request(&ride_id, &request_id, action.as_deref(), &user_id)
        .await?;

    let response = ApiResponse::with_message(
        format!("Request {}", request.status()),
        RequestBody {
            request: RideRequestDto::from(&request),
        },
    );
    Ok((StatusCode::OK, Json(response)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("action=accept"), Some("accept"))]
    #[case(Some("foo=bar&action=reject"), Some("reject"))]
    #[case(Some("action=accept&action=reject"), Some("accept"))]
    #[case(Some("action="), Some(""))]
    #[case(Some("action%5Bkind%5D=accept"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_クエリからactionを取り出す(#[case] query: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(extract_action(query).as_deref(), expected);
    }
}
