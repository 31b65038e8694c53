//! # Ride Service サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `RIDE_SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `RIDE_SERVICE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `REDIS_URL` | **Yes** | アクセストークンを保持する Redis の URL |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,ridesharing=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! RIDE_SERVICE_PORT=3000 DATABASE_URL=postgres://... REDIS_URL=redis://... \
//!     cargo run -p ridesharing-ride-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use ridesharing_domain::clock::SystemClock;
use ridesharing_infra::{
    RedisAccessTokenStore,
    db,
    repository::{PostgresRideOfferRepository, PostgresRideRequestRepository},
};
use ridesharing_ride_service::{
    app::{AppDependencies, build_router},
    config::RideServiceConfig,
};
use ridesharing_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("ride-service"));

    let config = RideServiceConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Ride Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションに失敗しました")?;
    tracing::info!("データベースに接続しました");

    let access_tokens = RedisAccessTokenStore::new(&config.redis_url)
        .await
        .context("Redis 接続に失敗しました")?;
    tracing::info!("Redis に接続しました");

    let app = build_router(AppDependencies {
        offer_repository:   Arc::new(PostgresRideOfferRepository::new(pool.clone())),
        request_repository: Arc::new(PostgresRideRequestRepository::new(pool)),
        access_tokens:      Arc::new(access_tokens),
        clock:              Arc::new(SystemClock),
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Ride Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
