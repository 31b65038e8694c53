//! # リポジトリ実装
//!
//! ユースケース層が呼び出す永続化インターフェースと、その PostgreSQL 実装を提供する。
//!
//! - [`RideOfferRepository`]: ライドオファーの作成・検索
//! - [`RideRequestRepository`]: 乗車リクエストの作成・検索・ステータス更新

pub mod ride_offer_repository;
pub mod ride_request_repository;

pub use ride_offer_repository::{PostgresRideOfferRepository, RideOfferRepository};
pub use ride_request_repository::{PostgresRideRequestRepository, RideRequestRepository};
