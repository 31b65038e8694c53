//! # ユースケース層
//!
//! ライドオファーと乗車リクエストの操作を定義する。
//! 入力の解析（ID・アクション）、存在確認、所有者チェックを行い、
//! 結果を [`CoreError`](crate::error::CoreError) として返す。

mod helpers;
pub mod request_transition;
pub mod ride_offer;
pub mod ride_request;

pub use request_transition::RequestTransitionUseCaseImpl;
pub use ride_offer::RideOfferUseCaseImpl;
pub use ride_request::RideRequestUseCaseImpl;
