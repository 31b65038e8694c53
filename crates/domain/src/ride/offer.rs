//! # ライドオファー
//!
//! ドライバーが投稿する乗車オファー。出発地・目的地・日付・時刻を持ち、
//! 作成後は変更されない（変わるのは紐づく乗車リクエストの集合だけ）。

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::validation::RideOfferDraft;
use crate::user::UserId;

define_positive_id! {
    /// ライド ID
    ///
    /// ストアが作成時に採番する正整数。
    pub struct RideId {
        entity_type: "Ride",
    }
}

/// 目的地の最大文字数
///
/// 入力検証ではなくストア側のルールとして扱う。
/// `rides.destination` カラムの `VARCHAR(100)` と一致させること。
pub const DESTINATION_MAX_LENGTH: usize = 100;

/// 受け付ける日付形式
const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// 受け付ける時刻形式
const TIME_FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];

/// 日付テキストをパースする
///
/// `12/6/2018` のような月/日/年形式と ISO 8601 形式を受け付ける。
pub fn parse_departure_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// 時刻テキストをパースする
///
/// `5:00 PM` のような 12 時間表記と `17:00` のような 24 時間表記を受け付ける。
pub fn parse_departure_time(raw: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}

/// ライドオファーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideOffer {
    id:             RideId,
    take_off_venue: String,
    destination:    String,
    date:           NaiveDate,
    time:           NaiveTime,
    owner_id:       UserId,
    created_at:     DateTime<Utc>,
}

/// ライドオファーの新規作成パラメータ
///
/// 日付・時刻は入力テキストのまま保持する。
/// パースできるかどうかはストアに保存する時点でルールとして判定される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRideOffer {
    pub take_off_venue: String,
    pub destination:    String,
    pub date:           String,
    pub time:           String,
    pub owner_id:       UserId,
    pub now:            DateTime<Utc>,
}

impl NewRideOffer {
    /// 検証済みの入力と呼び出し元から作成パラメータを組み立てる
    pub fn from_draft(draft: RideOfferDraft, owner_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            take_off_venue: draft.take_off_venue,
            destination: draft.destination,
            date: draft.date,
            time: draft.time,
            owner_id,
            now,
        }
    }
}

/// ライドオファーの DB 復元パラメータ
pub struct RideOfferRecord {
    pub id:             RideId,
    pub take_off_venue: String,
    pub destination:    String,
    pub date:           NaiveDate,
    pub time:           NaiveTime,
    pub owner_id:       UserId,
    pub created_at:     DateTime<Utc>,
}

impl RideOffer {
    /// 既存のデータから復元する
    pub fn from_db(record: RideOfferRecord) -> Self {
        Self {
            id:             record.id,
            take_off_venue: record.take_off_venue,
            destination:    record.destination,
            date:           record.date,
            time:           record.time,
            owner_id:       record.owner_id,
            created_at:     record.created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> RideId {
        self.id
    }

    pub fn take_off_venue(&self) -> &str {
        &self.take_off_venue
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ビジネスロジックメソッド

    /// 指定ユーザーがこのオファーの所有者か判定する
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}
