//! # 乗車リクエストユースケース
//!
//! 乗客によるライドへの参加リクエストと、ドライバーによるリクエスト一覧の参照を扱う。

use std::sync::Arc;

use ridesharing_domain::{
    clock::Clock,
    ride::{NewRideRequest, RideRequest},
    user::UserId,
};
use ridesharing_infra::repository::{RideOfferRepository, RideRequestRepository};
use ridesharing_shared::{event_log::event, log_business_event};

use super::helpers::{FindResultExt, check_ride_owner, parse_ride_id};
use crate::error::{CoreError, message};

/// 乗車リクエストユースケース
pub struct RideRequestUseCaseImpl {
    offer_repository:   Arc<dyn RideOfferRepository>,
    request_repository: Arc<dyn RideRequestRepository>,
    clock:              Arc<dyn Clock>,
}

impl RideRequestUseCaseImpl {
    pub fn new(
        offer_repository: Arc<dyn RideOfferRepository>,
        request_repository: Arc<dyn RideRequestRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            offer_repository,
            request_repository,
            clock,
        }
    }

    /// ライドに届いたリクエストを作成順に取得する
    ///
    /// 1. ライド ID を解析（形式不正は 400）
    /// 2. ライドの存在確認（存在しなければ 404 "No Request Found!"）
    /// 3. 呼び出し元がライドの所有者か確認
    ///
    /// ライドが存在しリクエストが 0 件の場合は空の一覧を返す。
    pub async fn list_requests(
        &self,
        raw_ride_id: &str,
        caller: &UserId,
    ) -> Result<Vec<RideRequest>, CoreError> {
        let ride_id = parse_ride_id(raw_ride_id)?;

        let offer = self
            .offer_repository
            .find_by_id(ride_id)
            .await
            .or_not_found(|| CoreError::NotFound(message::NO_REQUEST_FOUND.to_string()))?;
        check_ride_owner(&offer, caller)?;

        let requests = self.request_repository.find_by_ride(ride_id).await?;
        Ok(requests)
    }

    /// ライドに参加リクエストを送る
    ///
    /// 作成されたリクエストは `pending`。
    /// 自分のライドへのリクエストと、同じライドへの二重リクエストは拒否する。
    pub async fn join_ride(
        &self,
        raw_ride_id: &str,
        requester_id: UserId,
    ) -> Result<RideRequest, CoreError> {
        let ride_id = parse_ride_id(raw_ride_id)?;

        let offer = self
            .offer_repository
            .find_by_id(ride_id)
            .await
            .or_not_found(|| CoreError::NotFound(message::RIDE_NOT_FOUND.to_string()))?;
        if offer.is_owned_by(&requester_id) {
            return Err(CoreError::BadRequest(
                message::CANNOT_REQUEST_OWN_RIDE.to_string(),
            ));
        }

        let new_request = NewRideRequest {
            ride_id,
            requester_id,
            now: self.clock.now(),
        };
        let request = self
            .request_repository
            .insert(&new_request)
            .await
            .map_err(|e| {
                if e.as_conflict().is_some() {
                    CoreError::Conflict(message::ALREADY_REQUESTED.to_string())
                } else {
                    CoreError::Database(e)
                }
            })?;

        log_business_event!(
            event.category = event::category::RIDE_REQUEST,
            event.action = event::action::REQUEST_CREATED,
            event.entity_type = event::entity_type::RIDE_REQUEST,
            event.entity_id = %request.id(),
            event.actor_id = %request.requester_id(),
            event.result = event::result::SUCCESS,
            ride_id = %ride_id,
            "乗車リクエスト作成"
        );

        Ok(request)
    }
}
