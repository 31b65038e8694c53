//! # 乗車リクエスト
//!
//! 乗客がライドオファーに対して送るリクエスト。
//! オファー所有者の判断で `pending` から `accepted` / `rejected` に一度だけ遷移する。
//!
//! ## 状態遷移
//!
//! ```text
//!            accept
//!          ┌────────→ accepted（終端）
//! pending ─┤
//!          └────────→ rejected（終端）
//!            reject
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use super::offer::RideId;
use crate::{DomainError, user::UserId};

define_positive_id! {
    /// 乗車リクエスト ID
    ///
    /// ストアが作成時に採番する正整数。ストア全体で一意なので、
    /// 親ライドの中でも一意になる。
    pub struct RideRequestId {
        entity_type: "RideRequest",
    }
}

/// 乗車リクエストステータス
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RideRequestStatus {
    /// 判断待ち
    Pending,
    /// 承諾済み
    Accepted,
    /// 拒否済み
    Rejected,
}

impl RideRequestStatus {
    /// 終端状態か判定する
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::str::FromStr for RideRequestStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::Validation(format!(
                "不正な乗車リクエストステータス: {}",
                s
            ))),
        }
    }
}

/// 乗車リクエストに対する更新アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum UpdateAction {
    /// 承諾
    Accept,
    /// 拒否
    Reject,
}

impl UpdateAction {
    /// 生の入力からアクションを決定する
    ///
    /// 受け付けるのは `"accept"` と `"reject"` の完全一致のみ。
    /// 未指定・空文字・大文字混じり・その他の値はすべて
    /// `DomainError::InvalidAction` になる。
    pub fn parse(raw: Option<&str>) -> Result<Self, DomainError> {
        match raw {
            Some("accept") => Ok(Self::Accept),
            Some("reject") => Ok(Self::Reject),
            other => Err(DomainError::InvalidAction(other.map(str::to_string))),
        }
    }

    /// アクション適用後のステータス
    pub fn target_status(self) -> RideRequestStatus {
        match self {
            Self::Accept => RideRequestStatus::Accepted,
            Self::Reject => RideRequestStatus::Rejected,
        }
    }
}

/// 乗車リクエストエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideRequest {
    id:           RideRequestId,
    ride_id:      RideId,
    status:       RideRequestStatus,
    requester_id: UserId,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

/// 乗車リクエストの新規作成パラメータ
///
/// ID はストアが採番し、ステータスは常に `pending` で始まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRideRequest {
    pub ride_id:      RideId,
    pub requester_id: UserId,
    pub now:          DateTime<Utc>,
}

/// 乗車リクエストの DB 復元パラメータ
pub struct RideRequestRecord {
    pub id:           RideRequestId,
    pub ride_id:      RideId,
    pub status:       RideRequestStatus,
    pub requester_id: UserId,
    pub created_at:   DateTime<Utc>,
    pub updated_at:   DateTime<Utc>,
}

impl RideRequest {
    /// 既存のデータから復元する
    pub fn from_db(record: RideRequestRecord) -> Self {
        Self {
            id:           record.id,
            ride_id:      record.ride_id,
            status:       record.status,
            requester_id: record.requester_id,
            created_at:   record.created_at,
            updated_at:   record.updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> RideRequestId {
        self.id
    }

    pub fn ride_id(&self) -> RideId {
        self.ride_id
    }

    pub fn status(&self) -> RideRequestStatus {
        self.status
    }

    pub fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ビジネスロジックメソッド

    /// アクションを適用した新しいインスタンスを返す
    ///
    /// # Errors
    ///
    /// - `DomainError::InvalidTransition`: 既に `accepted` / `rejected` の場合
    pub fn apply(self, action: UpdateAction, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let target = action.target_status();
        if self.status.is_terminal() {
            return Err(DomainError::InvalidTransition {
                from: self.status.into(),
                to:   target.into(),
            });
        }

        Ok(Self {
            status: target,
            updated_at: now,
            ..self
        })
    }

    /// リクエストを承諾する
    pub fn accept(self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.apply(UpdateAction::Accept, now)
    }

    /// リクエストを拒否する
    pub fn reject(self, now: DateTime<Utc>) -> Result<Self, DomainError> {
        self.apply(UpdateAction::Reject, now)
    }
}
