//! # ライドオファーユースケース
//!
//! ドライバーによるライドオファーの作成と、オファーの参照を扱う。

use std::sync::Arc;

use ridesharing_domain::{
    clock::Clock,
    ride::{NewRideOffer, RideOffer, RideOfferPayload, validate_ride_offer},
    user::UserId,
};
use ridesharing_infra::{InfraError, InfraErrorKind, repository::RideOfferRepository};
use ridesharing_shared::{event_log::event, log_business_event};

use super::helpers::{FindResultExt, parse_ride_id};
use crate::error::{CoreError, message};

/// ライドオファーユースケース
pub struct RideOfferUseCaseImpl {
    offer_repository: Arc<dyn RideOfferRepository>,
    clock:            Arc<dyn Clock>,
}

impl RideOfferUseCaseImpl {
    pub fn new(offer_repository: Arc<dyn RideOfferRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            offer_repository,
            clock,
        }
    }

    /// ライドオファーを作成する
    ///
    /// 1. 必須フィールドを検証（違反はすべてまとめて返す）
    /// 2. 呼び出し元を所有者としてオファーを保存
    /// 3. ストア側のルール違反は `CoreError::DomainRule` にマッピング
    pub async fn create_offer(
        &self,
        payload: &RideOfferPayload,
        owner_id: UserId,
    ) -> Result<RideOffer, CoreError> {
        let draft = validate_ride_offer(payload).map_err(CoreError::Validation)?;
        let new_offer = NewRideOffer::from_draft(draft, owner_id, self.clock.now());

        let offer = self
            .offer_repository
            .insert(&new_offer)
            .await
            .map_err(|e| {
                log_business_event!(
                    event.category = event::category::RIDE,
                    event.action = event::action::OFFER_CREATED,
                    event.actor_id = %new_offer.owner_id,
                    event.result = event::result::FAILURE,
                    "ライドオファーの保存に失敗"
                );
                rule_violation_or_database(e)
            })?;

        log_business_event!(
            event.category = event::category::RIDE,
            event.action = event::action::OFFER_CREATED,
            event.entity_type = event::entity_type::RIDE_OFFER,
            event.entity_id = %offer.id(),
            event.actor_id = %offer.owner_id(),
            event.result = event::result::SUCCESS,
            "ライドオファー作成"
        );

        Ok(offer)
    }

    /// すべてのライドオファーを作成順に取得する
    pub async fn list_offers(&self) -> Result<Vec<RideOffer>, CoreError> {
        let offers = self.offer_repository.find_all().await?;
        Ok(offers)
    }

    /// ライドオファーを 1 件取得する
    pub async fn get_offer(&self, raw_ride_id: &str) -> Result<RideOffer, CoreError> {
        let ride_id = parse_ride_id(raw_ride_id)?;

        self.offer_repository
            .find_by_id(ride_id)
            .await
            .or_not_found(|| CoreError::NotFound(message::RIDE_NOT_FOUND.to_string()))
    }
}

/// 保存失敗を分類する
///
/// ルール違反は入力検証とは別の失敗として `DomainRule` に、それ以外はインフラ障害として扱う。
fn rule_violation_or_database(error: InfraError) -> CoreError {
    match error.kind() {
        InfraErrorKind::RuleViolation(reason) => CoreError::DomainRule(reason.clone()),
        _ => CoreError::Database(error),
    }
}
