//! # RideSharing ドメイン層
//!
//! ライドシェアの乗車リクエストライフサイクルを表すドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! ride-service → infra → domain
//! ```
//!
//! ドメイン層は DB や HTTP に一切依存しない。検証・状態遷移はすべて純粋関数で、
//! 失敗は [`DomainError`] または [`ride::ValidationErrors`] として値で返す。
//!
//! ## モジュール構成
//!
//! - [`ride`] - ライドオファー、乗車リクエスト、入力検証
//! - [`user`] - 呼び出し元の識別子
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use ridesharing_domain::{DomainError, ride::RideId};
//!
//! let error = RideId::parse("4jsa").unwrap_err();
//! assert!(matches!(error, DomainError::InvalidIdentifier { entity_type: "Ride", .. }));
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod ride;
pub mod user;

pub use error::DomainError;
