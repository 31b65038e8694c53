//! # 乗車リクエストの承諾・拒否
//!
//! ドライバーが自分のライドに届いたリクエストを `accepted` または `rejected` にする。
//!
//! 判定順序:
//!
//! 1. アクション（`accept` / `reject` 以外は 400）
//! 2. ライド ID・リクエスト ID の形式（400）
//! 3. ライド配下のリクエストの存在（404）
//! 4. 呼び出し元がライドの所有者か（403）
//! 5. 状態遷移（処理済みのリクエストは 409）

use std::sync::Arc;

use ridesharing_domain::{
    clock::Clock,
    ride::{RideId, RideRequest, RideRequestId, UpdateAction},
    user::UserId,
};
use ridesharing_infra::repository::{RideOfferRepository, RideRequestRepository};
use ridesharing_shared::{event_log::event, log_business_event};

use super::helpers::{FindResultExt, check_ride_owner, transition_error};
use crate::error::{CoreError, message};

/// 乗車リクエスト状態遷移ユースケース
pub struct RequestTransitionUseCaseImpl {
    offer_repository:   Arc<dyn RideOfferRepository>,
    request_repository: Arc<dyn RideRequestRepository>,
    clock:              Arc<dyn Clock>,
}

impl RequestTransitionUseCaseImpl {
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

    /// リクエストのステータスを更新する
    ///
    /// `raw_action` はクエリ文字列の `action` の値。未指定は `None`。
    pub async fn update_request(
        &self,
        raw_ride_id: &str,
        raw_request_id: &str,
        raw_action: Option<&str>,
        caller: &UserId,
    ) -> Result<RideRequest, CoreError> {
        let action = UpdateAction::parse(raw_action)
            .map_err(|_| CoreError::InvalidAction(message::INVALID_UPDATE_ACTION.to_string()))?;

        let invalid_id =
            |_| CoreError::InvalidIdentifier(message::INVALID_RIDE_OR_REQUEST_ID.to_string());
        let ride_id = RideId::parse(raw_ride_id).map_err(invalid_id)?;
        let request_id = RideRequestId::parse(raw_request_id).map_err(invalid_id)?;

        let request = self
            .request_repository
            .find_by_ride_and_id(ride_id, request_id)
            .await
            .or_not_found(request_not_found)?;
        let offer = self
            .offer_repository
            .find_by_id(ride_id)
            .await
            .or_not_found(request_not_found)?;
        check_ride_owner(&offer, caller)?;

        let updated = request
            .apply(action, self.clock.now())
            .map_err(transition_error)?;
        let saved = self
            .request_repository
            .update_status(&updated)
            .await
            .map_err(|e| {
                if e.as_conflict().is_some() {
                    CoreError::Conflict(message::REQUEST_ALREADY_PROCESSED.to_string())
                } else {
                    CoreError::Database(e)
                }
            })?;

        let action_name = match action {
            UpdateAction::Accept => event::action::REQUEST_ACCEPTED,
            UpdateAction::Reject => event::action::REQUEST_REJECTED,
        };
        log_business_event!(
            event.category = event::category::RIDE_REQUEST,
            event.action = action_name,
            event.entity_type = event::entity_type::RIDE_REQUEST,
            event.entity_id = %saved.id(),
            event.actor_id = %caller,
            event.result = event::result::SUCCESS,
            ride_id = %ride_id,
            "乗車リクエスト更新"
        );

        Ok(saved)
    }
}

fn request_not_found() -> CoreError {
    CoreError::RequestNotFound(message::REQUEST_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
    use pretty_assertions::assert_eq;
    use ridesharing_domain::{
        clock::FixedClock,
        ride::{RideOffer, RideOfferRecord, RideRequestRecord, RideRequestStatus},
    };
    use ridesharing_infra::mock::{MockRideOfferRepository, MockRideRequestRepository};
    use rstest::rstest;

    use super::*;

    fn created_at() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        created_at() + Duration::minutes(5)
    }

    struct Fixture {
        requests: MockRideRequestRepository,
        driver:   UserId,
        sut:      RequestTransitionUseCaseImpl,
    }

    /// ライド 3（driver 所有）にリクエスト 1 が pending で届いている状態を作る
    fn setup() -> Fixture {
        let offers = MockRideOfferRepository::new();
        let requests = MockRideRequestRepository::new();
        let driver = UserId::new();

        offers.add_offer(RideOffer::from_db(RideOfferRecord {
            id:             RideId::new(3).unwrap(),
            take_off_venue: "Egbeda".to_string(),
            destination:    "Orisunbare".to_string(),
            date:           NaiveDate::from_ymd_opt(2018, 12, 6).unwrap(),
            time:           NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            owner_id:       driver.clone(),
            created_at:     created_at(),
        }));
        requests.add_request(RideRequest::from_db(RideRequestRecord {
            id:           RideRequestId::new(1).unwrap(),
            ride_id:      RideId::new(3).unwrap(),
            status:       RideRequestStatus::Pending,
            requester_id: UserId::new(),
            created_at:   created_at(),
            updated_at:   created_at(),
        }));

        let sut = RequestTransitionUseCaseImpl::new(
            Arc::new(offers),
            Arc::new(requests.clone()),
            Arc::new(FixedClock::new(now())),
        );

        Fixture {
            requests,
            driver,
            sut,
        }
    }

    fn request_id(value: i64) -> RideRequestId {
        RideRequestId::new(value).unwrap()
    }

    #[rstest]
    #[case("accept", RideRequestStatus::Accepted)]
    #[case("reject", RideRequestStatus::Rejected)]
    #[tokio::test]
    async fn test_所有者はpendingのリクエストを更新できる(
        #[case] action: &str,
        #[case] expected: RideRequestStatus,
    ) {
        let fx = setup();

        let updated = fx
            .sut
            .update_request("3", "1", Some(action), &fx.driver)
            .await
            .unwrap();

        assert_eq!(updated.status(), expected);
        assert_eq!(updated.created_at(), created_at());
        assert_eq!(updated.updated_at(), now());
        assert_eq!(fx.requests.get(request_id(1)).unwrap().status(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("ACCEPT"))]
    #[case(Some("approve"))]
    #[tokio::test]
    async fn test_不正なアクションは400(#[case] action: Option<&str>) {
        let fx = setup();

        let err = fx
            .sut
            .update_request("3", "1", action, &fx.driver)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidAction(msg) if msg == "Invalid update action"));
        assert_eq!(
            fx.requests.get(request_id(1)).unwrap().status(),
            RideRequestStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_アクションはidより先に検証される() {
        let fx = setup();

        let err = fx
            .sut
            .update_request("id2", "id4", Some("maybe"), &fx.driver)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InvalidAction(_)));
    }

    #[rstest]
    #[case("id2", "1")]
    #[case("3", "id4")]
    #[case("0", "1")]
    #[tokio::test]
    async fn test_不正なidは400(#[case] ride_id: &str, #[case] request_id: &str) {
        let fx = setup();

        let err = fx
            .sut
            .update_request(ride_id, request_id, Some("accept"), &fx.driver)
            .await
            .unwrap_err();

        assert!(
            matches!(err, CoreError::InvalidIdentifier(msg) if msg == "Invalid Ride or Request ID")
        );
    }

    #[rstest]
    #[case("3", "100")]
    #[case("1", "1")]
    #[case("768", "1")]
    #[tokio::test]
    async fn test_ライド配下にないリクエストは404(
        #[case] ride_id: &str,
        #[case] request_id: &str,
    ) {
        let fx = setup();

        let err = fx
            .sut
            .update_request(ride_id, request_id, Some("reject"), &fx.driver)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::RequestNotFound(msg) if msg == "Request Not Found"));
    }

    #[tokio::test]
    async fn test_所有者以外は更新できない() {
        let fx = setup();

        let err = fx
            .sut
            .update_request("3", "1", Some("accept"), &UserId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Forbidden(_)));
        assert_eq!(
            fx.requests.get(request_id(1)).unwrap().status(),
            RideRequestStatus::Pending
        );
    }

    #[rstest]
    #[case("accept")]
    #[case("reject")]
    #[tokio::test]
    async fn test_処理済みのリクエストは再遷移できない(#[case] second: &str) {
        let fx = setup();
        fx.sut
            .update_request("3", "1", Some("accept"), &fx.driver)
            .await
            .unwrap();

        let err = fx
            .sut
            .update_request("3", "1", Some(second), &fx.driver)
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(
            fx.requests.get(request_id(1)).unwrap().status(),
            RideRequestStatus::Accepted
        );
    }
}
