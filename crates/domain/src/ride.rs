//! # ライド
//!
//! ライドオファーと、それに紐づく乗車リクエストを管理する。
//!
//! ## 概念モデル
//!
//! - **RideOffer**: ドライバーが投稿するオファー（作成後は不変）
//! - **RideRequest**: 乗客がオファーに送るリクエスト（`pending` から一度だけ遷移）
//! - **Validator**: オファー入力・識別子・更新アクションの検証
//!
//! ## 使用例
//!
//! ```rust
//! use ridesharing_domain::ride::{RideOfferPayload, UpdateAction, validate_ride_offer};
//!
//! let errors = validate_ride_offer(&RideOfferPayload::default()).unwrap_err();
//! assert_eq!(errors.get("destination"), Some("destination is required"));
//!
//! assert!(UpdateAction::parse(Some("approve")).is_err());
//! ```

mod offer;
mod request;
mod validation;

pub use offer::{
    DESTINATION_MAX_LENGTH,
    NewRideOffer,
    RideId,
    RideOffer,
    RideOfferRecord,
    parse_departure_date,
    parse_departure_time,
};
pub use request::{
    NewRideRequest,
    RideRequest,
    RideRequestId,
    RideRequestRecord,
    RideRequestStatus,
    UpdateAction,
};
pub use validation::{RideOfferDraft, RideOfferPayload, ValidationErrors, validate_ride_offer};
