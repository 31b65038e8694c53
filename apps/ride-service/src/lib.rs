//! # Ride Service
//!
//! ライドシェアのライドオファーと乗車リクエストのライフサイクルを扱うサービス。
//!
//! - [`usecase`]: オファー作成、リクエスト一覧、参加、承諾・拒否
//! - [`handler`]: axum ハンドラと DTO
//! - [`middleware`]: `x-access-token` による認証
//! - [`app`]: ルーター構築

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
