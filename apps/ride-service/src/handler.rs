//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置し、ここで re-export する
//! - ハンドラはパスやボディの取り出しとレスポンス整形だけを行い、判定はユースケースに委譲する

pub mod health;
pub mod ride;
pub mod ride_request;

pub use health::health_check;
pub use ride::{RideState, create_offer, get_offer, list_offers};
pub use ride_request::{RideRequestState, join_ride, list_requests, update_request};
