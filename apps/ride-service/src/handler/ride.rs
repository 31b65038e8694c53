//! # ライドオファー API ハンドラ
//!
//! ライドオファーの作成・一覧・取得を扱う。

use std::sync::Arc;

use axum::{
    Extension,
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use ridesharing_domain::ride::{RideOffer, RideOfferPayload};
use ridesharing_shared::ApiResponse;
use serde::Serialize;
use serde_json::Value;

use crate::{
    error::CoreError,
    middleware::CurrentUser,
    usecase::RideOfferUseCaseImpl,
};

/// ライドオファー API の共有状態
pub struct RideState {
    pub usecase: RideOfferUseCaseImpl,
}

/// ライドオファー DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOfferDto {
    pub id:             i64,
    pub take_off_venue: String,
    pub destination:    String,
    /// `YYYY-MM-DD`
    pub date:           String,
    /// `HH:MM:SS`
    pub time:           String,
    pub owner_id:       String,
    pub created_at:     String,
}

impl From<&RideOffer> for RideOfferDto {
    fn from(offer: &RideOffer) -> Self {
        Self {
            id:             offer.id().as_i64(),
            take_off_venue: offer.take_off_venue().to_string(),
            destination:    offer.destination().to_string(),
            date:           offer.date().to_string(),
            time:           offer.time().to_string(),
            owner_id:       offer.owner_id().to_string(),
            created_at:     offer.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RideBody {
    pub ride: RideOfferDto,
}

#[derive(Debug, Serialize)]
pub struct RidesBody {
    pub rides: Vec<RideOfferDto>,
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// フォームのボディをペイロードとして読む
///
/// 同じキーが複数ある場合は最初の値を採用する。
fn parse_form(body: &[u8]) -> RideOfferPayload {
    let mut payload = RideOfferPayload::default();

    for (key, value) in url::form_urlencoded::parse(body) {
        let slot = match key.as_ref() {
            "destination" => &mut payload.destination,
            "time" => &mut payload.time,
            "date" => &mut payload.date,
            "takeOffVenue" => &mut payload.take_off_venue,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    payload
}

/// リクエストボディをペイロードとして読む
///
/// 空のボディはすべて未指定のペイロードとして扱い、必須項目の検証に回す。
/// フォーム以外のボディは JSON オブジェクトでなければならない。未知のキーは無視する。
fn parse_payload(content_type: Option<&str>, body: &[u8]) -> Result<RideOfferPayload, CoreError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RideOfferPayload::default());
    }

    if is_form(content_type) {
        return Ok(parse_form(body));
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| CoreError::MalformedPayload(e.to_string()))?;
    if !value.is_object() {
        return Err(CoreError::MalformedPayload(
            "JSON オブジェクトではありません".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| CoreError::MalformedPayload(e.to_string()))
}

/// POST /api/v1/users/rides
///
/// 呼び出し元をドライバーとしてライドオファーを作成する。
///
/// ## レスポンス
///
/// - `200 OK`: 作成したオファー
/// - `400 Bad Request`: 必須項目の欠落（`errors` にフィールドごとの理由）、
///   またはボディを解釈できない（`message` のみ）
/// - `500 Internal Server Error`: 目的地が長すぎる、日付・時刻を解釈できない
#[tracing::instrument(skip_all)]
pub async fn create_offer(
    State(state): State<Arc<RideState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CoreError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());
    let payload = parse_payload(content_type, &body)?;

    let offer = state.usecase.create_offer(&payload, user_id).await?;

    let response = ApiResponse::with_message(
        "Ride offer created",
        RideBody {
            ride: RideOfferDto::from(&offer),
        },
    );
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/v1/rides
#[tracing::instrument(skip_all)]
pub async fn list_offers(
    State(state): State<Arc<RideState>>,
) -> Result<impl IntoResponse, CoreError> {
    let offers = state.usecase.list_offers().await?;

    let response = ApiResponse::new(RidesBody {
        rides: offers.iter().map(RideOfferDto::from).collect(),
    });
    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/v1/rides/{ride_id}
///
/// ## レスポンス
///
/// - `200 OK`: オファー
/// - `400 Bad Request`: ID が正の整数でない
/// - `404 Not Found`: オファーが見つからない
#[tracing::instrument(skip_all, fields(%ride_id))]
pub async fn get_offer(
    State(state): State<Arc<RideState>>,
    Path(ride_id): Path<String>,
) -> Result<impl IntoResponse, CoreError> {
    let offer = state.usecase.get_offer(&ride_id).await?;

    let response = ApiResponse::new(RideBody {
        ride: RideOfferDto::from(&offer),
    });
    Ok((StatusCode::OK, Json(response)))
}
