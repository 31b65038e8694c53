//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use ridesharing_domain::{
    ride::{NewRideOffer, NewRideRequest, RideOffer},
    user::UserId,
};
use ridesharing_infra::repository::{PostgresRideOfferRepository, RideOfferRepository};
use sqlx::PgPool;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// ルールを満たすオファー作成パラメータ
pub fn new_offer(owner_id: UserId) -> NewRideOffer {
    NewRideOffer {
        take_off_venue: "Egbeda".to_string(),
        destination:    "Orisunbare".to_string(),
        date:           "12/6/2018".to_string(),
        time:           "5:00 PM".to_string(),
        owner_id,
        now:            test_now(),
    }
}

/// オファーを 1 件保存して返す
pub async fn insert_offer(pool: &PgPool, owner_id: UserId) -> RideOffer {
    PostgresRideOfferRepository::new(pool.clone())
        .insert(&new_offer(owner_id))
        .await
        .unwrap()
}

/// リクエスト作成パラメータ
pub fn new_request(offer: &RideOffer, requester_id: UserId) -> NewRideRequest {
    NewRideRequest {
        ride_id: offer.id(),
        requester_id,
        now: test_now(),
    }
}
