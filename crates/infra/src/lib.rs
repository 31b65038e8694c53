//! # RideSharing インフラ層
//!
//! PostgreSQL と Redis への接続、およびユースケース層が呼び出す
//! リポジトリ・アクセストークンストアの具体実装を提供する。
//!
//! ## 依存関係
//!
//! ```text
//! ride-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`repository`] - ライドオファー・乗車リクエストのリポジトリ
//! - [`access_token`] - アクセストークンからの呼び出し元解決
//! - [`error`] - インフラ層エラー定義
//! - `mock` - インメモリ実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use ridesharing_infra::{RedisAccessTokenStore, db, repository::PostgresRideOfferRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/ridesharing").await?;
//!     let offers = PostgresRideOfferRepository::new(pool.clone());
//!     let tokens = RedisAccessTokenStore::new("redis://localhost").await?;
//!     Ok(())
//! }
//! ```

pub mod access_token;
pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use access_token::{AccessTokenStore, RedisAccessTokenStore};
pub use error::{InfraError, InfraErrorKind};
