//! # Ride Service 設定
//!
//! 環境変数から Ride Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },
}

/// Ride Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// Redis 接続 URL（アクセストークン解決用）
    pub redis_url:    String,
}

impl RideServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let raw_port = require("RIDE_SERVICE_PORT")?;
        let port = raw_port.parse().map_err(|_| ConfigError::InvalidPort {
            name:  "RIDE_SERVICE_PORT",
            value: raw_port.clone(),
        })?;

        Ok(Self {
            host: lookup("RIDE_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url: require("DATABASE_URL")?,
            redis_url: require("REDIS_URL")?,
        })
    }
}
