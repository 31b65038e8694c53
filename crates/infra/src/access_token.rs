//! # アクセストークン解決
//!
//! `x-access-token` ヘッダの値を呼び出し元のユーザー ID に解決する。
//!
//! トークンの発行・失効は外部の認証基盤の責務で、このサービスは
//! 認証基盤が Redis に書き込んだエントリを読むだけ。
//!
//! ## Redis キー設計
//!
//! ```text
//! access_token:{token} → {"user_id": "<uuid>"}
//! ```
//!
//! TTL は認証基盤が設定する。期限切れのキーは存在しないものとして扱う。

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use ridesharing_domain::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::InfraError;

/// Redis に保存されているトークンエントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenEntry {
    pub user_id: Uuid,
}

/// アクセストークンストア
///
/// 実装は Redis を使用する [`RedisAccessTokenStore`] を参照。
#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    /// トークンからユーザー ID を解決する
    ///
    /// 未登録・期限切れのトークンは `None`。
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, InfraError>;
}

/// Redis を使用したアクセストークンストア
pub struct RedisAccessTokenStore {
    conn: ConnectionManager,
}

impl RedisAccessTokenStore {
    /// 新しい RedisAccessTokenStore を作成する
    ///
    /// - `redis_url`: Redis 接続 URL（例: `redis://localhost:6379`）
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// トークンのキーを生成する
    fn token_key(token: &str) -> String {
        format!("access_token:{token}")
    }
}

#[async_trait]
impl AccessTokenStore for RedisAccessTokenStore {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, InfraError> {
        let key = Self::token_key(token);
        let mut conn = self.conn.clone();

        let result: Option<String> = conn.get(&key).await?;

        match result {
            Some(json) => {
                let entry: AccessTokenEntry = serde_json::from_str(&json)?;
                Ok(Some(UserId::from_uuid(entry.user_id)))
            }
            None => Ok(None),
        }
    }
}
