//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換や所有者チェックなど、
//! 複数のユースケースで繰り返されるパターンを共通化する。

use ridesharing_domain::{
    DomainError,
    ride::{RideId, RideOffer},
    user::UserId,
};
use ridesharing_infra::InfraError;

use crate::error::{CoreError, message};

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let offer = self.offer_repository.find_by_id(ride_id).await
///     .or_not_found(|| CoreError::NotFound(message::RIDE_NOT_FOUND.to_string()))?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `not_found` が返すエラー、`InfraError` の場合は `CoreError::Database`
    fn or_not_found(self, not_found: impl FnOnce() -> CoreError) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, not_found: impl FnOnce() -> CoreError) -> Result<T, CoreError> {
        self?.ok_or_else(not_found)
    }
}

/// パスのライド ID を解析する
pub(crate) fn parse_ride_id(raw: &str) -> Result<RideId, CoreError> {
    RideId::parse(raw).map_err(|_| CoreError::InvalidIdentifier(message::INVALID_RIDE_ID.to_string()))
}

/// ライドの所有者をチェックする
///
/// 呼び出し元がオファーの所有者でない場合、`CoreError::Forbidden` を返す。
pub(crate) fn check_ride_owner(offer: &RideOffer, user_id: &UserId) -> Result<(), CoreError> {
    if !offer.is_owned_by(user_id) {
        return Err(CoreError::Forbidden(message::NOT_RIDE_OWNER.to_string()));
    }
    Ok(())
}

/// 状態遷移の失敗を `CoreError` に変換する
pub(crate) fn transition_error(error: DomainError) -> CoreError {
    match error {
        DomainError::InvalidTransition { .. } => {
            CoreError::Conflict(message::REQUEST_ALREADY_PROCESSED.to_string())
        }
        other => CoreError::Internal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;
    use ridesharing_domain::ride::RideOfferRecord;
    use rstest::rstest;

    use super::*;

    fn offer_owned_by(owner_id: UserId) -> RideOffer {
        RideOffer::from_db(RideOfferRecord {
            id: RideId::new(1).unwrap(),
            take_off_venue: "Egbeda".to_string(),
            destination: "Orisunbare".to_string(),
            date: NaiveDate::from_ymd_opt(2018, 12, 6).unwrap(),
            time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            owner_id,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        })
    }

    // === FindResultExt ===

    #[test]
    fn test_or_not_found_ok_some_は値を返す() {
        let result: Result<Option<i32>, InfraError> = Ok(Some(42));

        let value = result
            .or_not_found(|| CoreError::NotFound("unused".to_string()))
            .unwrap();

        assert_eq!(value, 42);
    }

    #[test]
    fn test_or_not_found_ok_none_は指定したエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Ok(None);

        let err = result
            .or_not_found(|| CoreError::RequestNotFound(message::REQUEST_NOT_FOUND.to_string()))
            .unwrap_err();

        assert!(matches!(err, CoreError::RequestNotFound(msg) if msg == "Request Not Found"));
    }

    #[test]
    fn test_or_not_found_err_はデータベースエラーを返す() {
        let result: Result<Option<i32>, InfraError> = Err(InfraError::unexpected("db down"));

        let err = result
            .or_not_found(|| CoreError::NotFound("unused".to_string()))
            .unwrap_err();

        assert!(matches!(err, CoreError::Database(_)));
    }

    // === parse_ride_id ===

    #[rstest]
    #[case("4jsa")]
    #[case("0")]
    #[case("-1")]
    #[case("01")]
    #[case("")]
    fn test_正準形式でないライドidは拒否される(#[case] raw: &str) {
        let err = parse_ride_id(raw).unwrap_err();

        assert!(matches!(err, CoreError::InvalidIdentifier(msg) if msg == "Invalid Ride ID"));
    }

    #[test]
    fn test_正のライドidは解析できる() {
        assert_eq!(parse_ride_id("768").unwrap().as_i64(), 768);
    }

    // === check_ride_owner ===

    #[test]
    fn test_所有者はチェックを通過する() {
        let owner = UserId::new();
        let offer = offer_owned_by(owner.clone());

        assert!(check_ride_owner(&offer, &owner).is_ok());
    }

    #[test]
    fn test_所有者以外はforbidden() {
        let offer = offer_owned_by(UserId::new());

        let err = check_ride_owner(&offer, &UserId::new()).unwrap_err();

        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    // === transition_error ===

    #[test]
    fn test_終端状態からの遷移は競合になる() {
        let err = transition_error(DomainError::InvalidTransition {
            from: "accepted",
            to:   "rejected",
        });

        assert!(
            matches!(err, CoreError::Conflict(msg) if msg == "Request has already been processed")
        );
    }
}
