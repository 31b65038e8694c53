//! ルーターテストの共通セットアップ
//!
//! モックリポジトリとモックトークンストアでルーターを組み立て、
//! ドライバーと乗客のトークンを登録した状態を提供する。

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ridesharing_domain::{
    clock::FixedClock,
    ride::{
        RideId,
        RideOffer,
        RideOfferRecord,
        RideRequest,
        RideRequestId,
        RideRequestRecord,
        RideRequestStatus,
    },
    user::UserId,
};
use ridesharing_infra::mock::{
    MockAccessTokenStore,
    MockRideOfferRepository,
    MockRideRequestRepository,
};
use ridesharing_ride_service::app::{AppDependencies, build_router};
use serde_json::Value;
use tower::ServiceExt;

pub const DRIVER_TOKEN: &str = "driver-token";
pub const PASSENGER_TOKEN: &str = "passenger-token";

pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub struct TestApp {
    pub router:    Router,
    pub offers:    MockRideOfferRepository,
    pub requests:  MockRideRequestRepository,
    pub driver:    UserId,
    pub passenger: UserId,
}

impl TestApp {
    pub fn new() -> Self {
        let offers = MockRideOfferRepository::new();
        let requests = MockRideRequestRepository::new();
        let tokens = MockAccessTokenStore::new();
        let driver = UserId::new();
        let passenger = UserId::new();
        tokens.insert(DRIVER_TOKEN, driver.clone());
        tokens.insert(PASSENGER_TOKEN, passenger.clone());

        let router = build_router(AppDependencies {
            offer_repository:   Arc::new(offers.clone()),
            request_repository: Arc::new(requests.clone()),
            access_tokens:      Arc::new(tokens),
            clock:              Arc::new(FixedClock::new(now())),
        });

        Self {
            router,
            offers,
            requests,
            driver,
            passenger,
        }
    }

    /// driver 所有のライドを登録する
    pub fn seed_offer(&self, id: i64) {
        self.offers.add_offer(RideOffer::from_db(RideOfferRecord {
            id:             RideId::new(id).unwrap(),
            take_off_venue: "Egbeda".to_string(),
            destination:    "Orisunbare".to_string(),
            date:           NaiveDate::from_ymd_opt(2018, 12, 6).unwrap(),
            time:           NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            owner_id:       self.driver.clone(),
            created_at:     now(),
        }));
    }

    /// passenger からのリクエストを登録する
    pub fn seed_request(&self, ride_id: i64, id: i64, status: RideRequestStatus) {
        self.requests.add_request(RideRequest::from_db(RideRequestRecord {
            id: RideRequestId::new(id).unwrap(),
            ride_id: RideId::new(ride_id).unwrap(),
            status,
            requester_id: self.passenger.clone(),
            created_at: now(),
            updated_at: now(),
        }));
    }

    /// リクエストを送り、ステータスと JSON ボディを返す
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-access-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.dispatch(builder.body(body).unwrap()).await
    }

    /// フォームエンコードのボディで POST し、ステータスと JSON ボディを返す
    pub async fn send_form(&self, uri: &str, token: Option<&str>, form: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(token) = token {
            builder = builder.header("x-access-token", token);
        }

        self.dispatch(builder.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
