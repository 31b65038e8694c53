//! # テスト用モックリポジトリ
//!
//! ユースケーステスト・ルーターテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! ridesharing-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 採番・ルール判定・`pending` ガードは PostgreSQL 実装と同じ振る舞いをする。

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use ridesharing_domain::{
    ride::{
        NewRideOffer,
        NewRideRequest,
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

use crate::{
    access_token::AccessTokenStore,
    error::InfraError,
    repository::{
        RideOfferRepository,
        RideRequestRepository,
        ride_offer_repository::apply_storage_rules,
    },
};

// ===== MockRideOfferRepository =====

#[derive(Clone, Default)]
pub struct MockRideOfferRepository {
    offers: Arc<Mutex<Vec<RideOffer>>>,
}

impl MockRideOfferRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 採番済みのオファーを直接登録する
    pub fn add_offer(&self, offer: RideOffer) {
        self.offers.lock().unwrap().push(offer);
    }

    /// 登録済みのオファー数
    pub fn count(&self) -> usize {
        self.offers.lock().unwrap().len()
    }
}

#[async_trait]
impl RideOfferRepository for MockRideOfferRepository {
    async fn insert(&self, offer: &NewRideOffer) -> Result<RideOffer, InfraError> {
        let storable = apply_storage_rules(offer)?;
        let mut offers = self.offers.lock().unwrap();

        let next_id = offers.iter().map(|o| o.id().as_i64()).max().unwrap_or(0) + 1;
        let created = RideOffer::from_db(RideOfferRecord {
            id:             RideId::new(next_id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            take_off_venue: storable.take_off_venue,
            destination:    storable.destination,
            date:           storable.date,
            time:           storable.time,
            owner_id:       offer.owner_id.clone(),
            created_at:     offer.now,
        });
        offers.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: RideId) -> Result<Option<RideOffer>, InfraError> {
        Ok(self
            .offers
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<RideOffer>, InfraError> {
        let mut offers = self.offers.lock().unwrap().clone();
        offers.sort_by_key(RideOffer::id);
        Ok(offers)
    }
}

// ===== MockRideRequestRepository =====

#[derive(Clone, Default)]
pub struct MockRideRequestRepository {
    requests: Arc<Mutex<Vec<RideRequest>>>,
}

impl MockRideRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 採番済みのリクエストを直接登録する
    pub fn add_request(&self, request: RideRequest) {
        self.requests.lock().unwrap().push(request);
    }

    /// ID でリクエストを取得する（ストアの状態確認用）
    pub fn get(&self, id: RideRequestId) -> Option<RideRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }
}

#[async_trait]
impl RideRequestRepository for MockRideRequestRepository {
    async fn find_by_ride(&self, ride_id: RideId) -> Result<Vec<RideRequest>, InfraError> {
        let mut requests: Vec<RideRequest> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.ride_id() == ride_id)
            .cloned()
            .collect();
        requests.sort_by_key(RideRequest::id);
        Ok(requests)
    }

    async fn find_by_ride_and_id(
        &self,
        ride_id: RideId,
        id: RideRequestId,
    ) -> Result<Option<RideRequest>, InfraError> {
        Ok(self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.ride_id() == ride_id && r.id() == id)
            .cloned())
    }

    async fn insert(&self, request: &NewRideRequest) -> Result<RideRequest, InfraError> {
        let mut requests = self.requests.lock().unwrap();

        if requests
            .iter()
            .any(|r| r.ride_id() == request.ride_id && r.requester_id() == &request.requester_id)
        {
            return Err(InfraError::conflict(
                "RideRequest",
                request.requester_id.to_string(),
            ));
        }

        let next_id = requests.iter().map(|r| r.id().as_i64()).max().unwrap_or(0) + 1;
        let created = RideRequest::from_db(RideRequestRecord {
            id:           RideRequestId::new(next_id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            ride_id:      request.ride_id,
            status:       RideRequestStatus::Pending,
            requester_id: request.requester_id.clone(),
            created_at:   request.now,
            updated_at:   request.now,
        });
        requests.push(created.clone());
        Ok(created)
    }

    async fn update_status(&self, request: &RideRequest) -> Result<RideRequest, InfraError> {
        let mut requests = self.requests.lock().unwrap();

        let stored = requests.iter_mut().find(|r| {
            r.id() == request.id()
                && r.ride_id() == request.ride_id()
                && r.status() == RideRequestStatus::Pending
        });

        match stored {
            Some(stored) => {
                *stored = request.clone();
                Ok(request.clone())
            }
            None => Err(InfraError::conflict(
                "RideRequest",
                request.id().to_string(),
            )),
        }
    }
}

// ===== MockAccessTokenStore =====

#[derive(Clone, Default)]
pub struct MockAccessTokenStore {
    tokens: Arc<Mutex<HashMap<String, UserId>>>,
}

impl MockAccessTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// トークンを登録する
    pub fn insert(&self, token: impl Into<String>, user_id: UserId) {
        self.tokens.lock().unwrap().insert(token.into(), user_id);
    }
}

#[async_trait]
impl AccessTokenStore for MockAccessTokenStore {
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, InfraError> {
        Ok(self.tokens.lock().unwrap().get(token).cloned())
    }
}
