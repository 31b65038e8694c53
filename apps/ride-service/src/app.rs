//! # アプリケーション構築
//!
//! 依存コンポーネントから State を組み立て、ルーターを構築する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use ridesharing_domain::clock::Clock;
use ridesharing_infra::{
    AccessTokenStore,
    repository::{RideOfferRepository, RideRequestRepository},
};
use ridesharing_shared::observability::make_request_span;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        RideRequestState,
        RideState,
        create_offer,
        get_offer,
        health_check,
        join_ride,
        list_offers,
        list_requests,
        update_request,
    },
    middleware::{AuthState, require_access_token},
    usecase::{RequestTransitionUseCaseImpl, RideOfferUseCaseImpl, RideRequestUseCaseImpl},
};

/// ルーターが必要とする依存コンポーネント
#[derive(Clone)]
pub struct AppDependencies {
    pub offer_repository:   Arc<dyn RideOfferRepository>,
    pub request_repository: Arc<dyn RideRequestRepository>,
    pub access_tokens:      Arc<dyn AccessTokenStore>,
    pub clock:              Arc<dyn Clock>,
}

/// ルーターを構築する
///
/// `/api/v1` 配下はすべて `x-access-token` による認証が必要。`/health` は認証不要。
pub fn build_router(deps: AppDependencies) -> Router {
    let ride_state = Arc::new(RideState {
        usecase: RideOfferUseCaseImpl::new(deps.offer_repository.clone(), deps.clock.clone()),
    });

    let request_state = Arc::new(RideRequestState {
        usecase:    RideRequestUseCaseImpl::new(
            deps.offer_repository.clone(),
            deps.request_repository.clone(),
            deps.clock.clone(),
        ),
        transition: RequestTransitionUseCaseImpl::new(
            deps.offer_repository,
            deps.request_repository,
            deps.clock,
        ),
    });

    let auth_state = AuthState {
        access_tokens: deps.access_tokens,
    };

    let ride_routes = Router::new()
        .route("/api/v1/rides", get(list_offers))
        .route("/api/v1/rides/{ride_id}", get(get_offer))
        .route("/api/v1/users/rides", post(create_offer))
        .with_state(ride_state);

    let request_routes = Router::new()
        .route("/api/v1/rides/{ride_id}/requests", post(join_ride))
        .route(
            "/api/v1/users/rides/{ride_id}/requests",
            get(list_requests),
        )
        .route(
            "/api/v1/users/rides/{ride_id}/requests/{request_id}",
            put(update_request),
        )
        .with_state(request_state);

    Router::new()
        .merge(ride_routes)
        .merge(request_routes)
        .route_layer(from_fn_with_state(auth_state, require_access_token))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
