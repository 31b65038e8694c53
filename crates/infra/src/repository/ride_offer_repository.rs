//! RideOfferRepository: ライドオファーの永続化
//!
//! 保存時にストア側のルールを適用する。違反は `InfraErrorKind::RuleViolation`
//! として返し、ユースケース層で入力検証エラーとは別の失敗として扱う。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use ridesharing_domain::{
    ride::{
        DESTINATION_MAX_LENGTH,
        NewRideOffer,
        RideId,
        RideOffer,
        RideOfferRecord,
        parse_departure_date,
        parse_departure_time,
    },
    user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// RideOfferRepository トレイト
#[async_trait]
pub trait RideOfferRepository: Send + Sync {
    /// ライドオファーを保存し、採番済みのエンティティを返す
    ///
    /// # Errors
    ///
    /// - `InfraErrorKind::RuleViolation`: 目的地が長すぎる、日付・時刻として解釈できない
    async fn insert(&self, offer: &NewRideOffer) -> Result<RideOffer, InfraError>;

    /// ID でライドオファーを検索する
    async fn find_by_id(&self, id: RideId) -> Result<Option<RideOffer>, InfraError>;

    /// すべてのライドオファーを作成順に取得する
    async fn find_all(&self) -> Result<Vec<RideOffer>, InfraError>;
}

/// 保存可能な形に正規化したライドオファー
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StorableRideOffer {
    pub take_off_venue: String,
    pub destination:    String,
    pub date:           NaiveDate,
    pub time:           NaiveTime,
}

/// ストア側のルールを適用する
///
/// PostgreSQL 実装とモック実装で同じ判定を共有する。
pub(crate) fn apply_storage_rules(offer: &NewRideOffer) -> Result<StorableRideOffer, InfraError> {
    if offer.destination.chars().count() > DESTINATION_MAX_LENGTH {
        return Err(InfraError::rule_violation(format!(
            "目的地は {DESTINATION_MAX_LENGTH} 文字以内である必要があります"
        )));
    }

    let date = parse_departure_date(&offer.date).ok_or_else(|| {
        InfraError::rule_violation(format!("日付として解釈できません: {}", offer.date))
    })?;
    let time = parse_departure_time(&offer.time).ok_or_else(|| {
        InfraError::rule_violation(format!("時刻として解釈できません: {}", offer.time))
    })?;

    Ok(StorableRideOffer {
        take_off_venue: offer.take_off_venue.clone(),
        destination: offer.destination.clone(),
        date,
        time,
    })
}

/// ルール違反に相当する SQLSTATE
///
/// - `22001`: string_data_right_truncation
/// - `22007`: invalid_datetime_format
/// - `22008`: datetime_field_overflow
/// - `23514`: check_violation
const RULE_VIOLATION_SQLSTATES: [&str; 4] = ["22001", "22007", "22008", "23514"];

/// sqlx のエラーを InfraError に変換する
///
/// ストアの制約に弾かれた場合はルール違反として扱う。
fn classify_write_error(error: sqlx::Error) -> InfraError {
    let violation = match &error {
        sqlx::Error::Database(db_error)
            if db_error
                .code()
                .is_some_and(|code| RULE_VIOLATION_SQLSTATES.contains(&&*code)) =>
        {
            Some(db_error.message().to_string())
        }
        _ => None,
    };

    match violation {
        Some(message) => InfraError::rule_violation(message),
        None => InfraError::from(error),
    }
}

/// DB の rides テーブルの行を表す中間構造体
#[derive(sqlx::FromRow)]
struct RideOfferRow {
    id:             i64,
    take_off_venue: String,
    destination:    String,
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    owner_id:       Uuid,
    created_at:     DateTime<Utc>,
}

impl TryFrom<RideOfferRow> for RideOffer {
    type Error = InfraError;

    fn try_from(row: RideOfferRow) -> Result<Self, Self::Error> {
        Ok(RideOffer::from_db(RideOfferRecord {
            id:             RideId::new(row.id)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            take_off_venue: row.take_off_venue,
            destination:    row.destination,
            date:           row.departure_date,
            time:           row.departure_time,
            owner_id:       UserId::from_uuid(row.owner_id),
            created_at:     row.created_at,
        }))
    }
}

/// PostgreSQL 実装
pub struct PostgresRideOfferRepository {
    pool: PgPool,
}

impl PostgresRideOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RideOfferRepository for PostgresRideOfferRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(owner_id = %offer.owner_id))]
    async fn insert(&self, offer: &NewRideOffer) -> Result<RideOffer, InfraError> {
        let storable = apply_storage_rules(offer)?;

        let row = sqlx::query_as::<_, RideOfferRow>(
            r#"
            INSERT INTO rides (
                take_off_venue, destination, departure_date, departure_time,
                owner_id, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                id, take_off_venue, destination, departure_date, departure_time,
                owner_id, created_at
            "#,
        )
        .bind(&storable.take_off_venue)
        .bind(&storable.destination)
        .bind(storable.date)
        .bind(storable.time)
        .bind(offer.owner_id.as_uuid())
        .bind(offer.now)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_write_error)?;

        RideOffer::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: RideId) -> Result<Option<RideOffer>, InfraError> {
        let row = sqlx::query_as::<_, RideOfferRow>(
            r#"
            SELECT
                id, take_off_venue, destination, departure_date, departure_time,
                owner_id, created_at
            FROM rides
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RideOffer::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<RideOffer>, InfraError> {
        let rows = sqlx::query_as::<_, RideOfferRow>(
            r#"
            SELECT
                id, take_off_venue, destination, departure_date, departure_time,
                owner_id, created_at
            FROM rides
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RideOffer::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::error::InfraErrorKind;

    #[fixture]
    fn new_offer() -> NewRideOffer {
        NewRideOffer {
            take_off_venue: "Egbeda".to_string(),
            destination:    "Orisunbare".to_string(),
            date:           "12/6/2018".to_string(),
            time:           "5:00 PM".to_string(),
            owner_id:       UserId::new(),
            now:            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[rstest]
    fn test_ルールを満たす入力は日付と時刻に正規化される(new_offer: NewRideOffer) {
        let storable = apply_storage_rules(&new_offer).unwrap();

        assert_eq!(
            storable,
            StorableRideOffer {
                take_off_venue: "Egbeda".to_string(),
                destination:    "Orisunbare".to_string(),
                date:           NaiveDate::from_ymd_opt(2018, 12, 6).unwrap(),
                time:           NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            }
        );
    }

    #[rstest]
    fn test_目的地は上限文字数ちょうどまで許容される(mut new_offer: NewRideOffer) {
        new_offer.destination = "あ".repeat(DESTINATION_MAX_LENGTH);

        assert!(apply_storage_rules(&new_offer).is_ok());
    }

    #[rstest]
    fn test_目的地が長すぎるとルール違反(mut new_offer: NewRideOffer) {
        new_offer.destination = "x".repeat(DESTINATION_MAX_LENGTH + 1);

        let err = apply_storage_rules(&new_offer).unwrap_err();

        assert!(matches!(err.kind(), InfraErrorKind::RuleViolation(_)));
    }

    #[rstest]
    #[case("13/14/2", "5:00 PM")]
    #[case("12/6/2018", "1")]
    fn test_解釈できない日付や時刻はルール違反(
        mut new_offer: NewRideOffer,
        #[case] date: &str,
        #[case] time: &str,
    ) {
        new_offer.date = date.to_string();
        new_offer.time = time.to_string();

        let err = apply_storage_rules(&new_offer).unwrap_err();

        assert!(err.is_rule_violation());
    }

    #[test]
    fn test_データベース以外のエラーはルール違反にならない() {
        let err = classify_write_error(sqlx::Error::RowNotFound);

        assert!(matches!(err.kind(), InfraErrorKind::Database(_)));
    }
}
