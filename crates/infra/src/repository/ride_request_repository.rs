//! RideRequestRepository: 乗車リクエストの永続化
//!
//! ステータス更新は `pending` の行だけを対象にする条件付き UPDATE で行い、
//! 同じリクエストへの並行した遷移はストアで直列化される。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ridesharing_domain::{
    ride::{
        NewRideRequest,
        RideId,
        RideRequest,
        RideRequestId,
        RideRequestRecord,
        RideRequestStatus,
    },
    user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 一意制約違反の SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

/// RideRequestRepository トレイト
#[async_trait]
pub trait RideRequestRepository: Send + Sync {
    /// ライドに紐づくリクエストを作成順に取得する
    async fn find_by_ride(&self, ride_id: RideId) -> Result<Vec<RideRequest>, InfraError>;

    /// ライド配下のリクエストを ID で検索する
    ///
    /// ライドが存在しない場合も `None` になる。
    async fn find_by_ride_and_id(
        &self,
        ride_id: RideId,
        id: RideRequestId,
    ) -> Result<Option<RideRequest>, InfraError>;

    /// `pending` のリクエストを作成する
    ///
    /// # Errors
    ///
    /// - `InfraErrorKind::Conflict`: 同じ乗客が同じライドに既にリクエスト済み
    async fn insert(&self, request: &NewRideRequest) -> Result<RideRequest, InfraError>;

    /// 遷移後のステータスを保存する
    ///
    /// ストア上でまだ `pending` の場合のみ更新する。
    ///
    /// # Errors
    ///
    /// - `InfraErrorKind::Conflict`: 既に他の更新で `pending` でなくなっていた
    async fn update_status(&self, request: &RideRequest) -> Result<RideRequest, InfraError>;
}

/// DB の ride_requests テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct RideRequestRow {
    id:           i64,
    ride_id:      i64,
    status:       String,
    requester_id: Uuid,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<RideRequestRow> for RideRequest {
    type Error = InfraError;

    fn try_from(row: RideRequestRow) -> Result<Self, Self::Error> {
        Ok(RideRequest::from_db(RideRequestRecord {
            id:           RideRequestId::new(row.id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            ride_id:      RideId::new(row.ride_id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            status:       row
                .status
                .parse::<RideRequestStatus>()
                .map_err(|e| InfraError::unexpected(format!("不正なステータス: {}", e)))?,
            requester_id: UserId::from_uuid(row.requester_id),
            created_at:   row.created_at,
            updated_at:   row.updated_at,
        }))
    }
}

/// PostgreSQL 実装
pub struct PostgresRideRequestRepository {
    pool: PgPool,
}

impl PostgresRideRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideRequestRepository for PostgresRideRequestRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%ride_id))]
    async fn find_by_ride(&self, ride_id: RideId) -> Result<Vec<RideRequest>, InfraError> {
        let rows = sqlx::query_as::<_, RideRequestRow>(
            r#"
            SELECT id, ride_id, status, requester_id, created_at, updated_at
            FROM ride_requests
            WHERE ride_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(ride_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RideRequest::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%ride_id, request_id = %id))]
    async fn find_by_ride_and_id(
        &self,
        ride_id: RideId,
        id: RideRequestId,
    ) -> Result<Option<RideRequest>, InfraError> {
        let row = sqlx::query_as::<_, RideRequestRow>(
            r#"
            SELECT id, ride_id, status, requester_id, created_at, updated_at
            FROM ride_requests
            WHERE id = $1 AND ride_id = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(ride_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RideRequest::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(ride_id = %request.ride_id))]
    async fn insert(&self, request: &NewRideRequest) -> Result<RideRequest, InfraError> {
        let status: &str = RideRequestStatus::Pending.into();
        let row = sqlx::query_as::<_, RideRequestRow>(
            r#"
            INSERT INTO ride_requests (ride_id, status, requester_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, ride_id, status, requester_id, created_at, updated_at
            "#,
        )
        .bind(request.ride_id.as_i64())
        .bind(status)
        .bind(request.requester_id.as_uuid())
        .bind(request.now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_error)
                if db_error.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                InfraError::conflict("RideRequest", request.requester_id.to_string())
            }
            _ => InfraError::from(e),
        })?;

        RideRequest::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(request_id = %request.id(), status = %request.status()))]
    async fn update_status(&self, request: &RideRequest) -> Result<RideRequest, InfraError> {
        let status: &str = request.status().into();
        let pending: &str = RideRequestStatus::Pending.into();
        let row = sqlx::query_as::<_, RideRequestRow>(
            r#"
            UPDATE ride_requests SET
                status = $1,
                updated_at = $2
            WHERE id = $3 AND ride_id = $4 AND status = $5
            RETURNING id, ride_id, status, requester_id, created_at, updated_at
            "#,
        )
        .bind(status)
        .bind(request.updated_at())
        .bind(request.id().as_i64())
        .bind(request.ride_id().as_i64())
        .bind(pending)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => RideRequest::try_from(row),
            None => Err(InfraError::conflict(
                "RideRequest",
                request.id().to_string(),
            )),
        }
    }
}
