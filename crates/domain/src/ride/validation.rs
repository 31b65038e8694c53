//! # ライドオファー入力検証
//!
//! ライドオファー作成リクエストの形状と必須項目を検証する。I/O は行わない。
//!
//! 検証はフィールドごとに独立しており、最初の違反で打ち切らない。
//! 呼び出し側は 1 回のやり取りですべての違反を受け取れる。

use serde::{Deserialize, Serialize, ser::SerializeMap};

/// ライドオファー作成の入力ペイロード
///
/// ワイヤ上のフィールド名は camelCase。未知のフィールドは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideOfferPayload {
    pub destination:    Option<String>,
    pub time:           Option<String>,
    pub date:           Option<String>,
    pub take_off_venue: Option<String>,
}

/// 検証を通過したライドオファー入力
///
/// 各フィールドは前後の空白を除いた非空文字列。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideOfferDraft {
    pub take_off_venue: String,
    pub destination:    String,
    pub date:           String,
    pub time:           String,
}

/// フィールド名 → 理由のマップ
///
/// 検証した順序を保ったまま JSON オブジェクトとしてシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 違反を追加する
    pub fn add(&mut self, field: &'static str, reason: impl Into<String>) {
        self.entries.push((field, reason.into()));
    }

    /// 指定フィールドの理由を取得する
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, reason)| reason.as_str())
    }

    /// 違反のあるフィールド名を検証順に返す
    pub fn fields(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, reason) in &self.entries {
            map.serialize_entry(field, reason)?;
        }
        map.end()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reasons: Vec<&str> = self
            .entries
            .iter()
            .map(|(_, reason)| reason.as_str())
            .collect();
        write!(f, "{}", reasons.join(", "))
    }
}

/// 必須フィールドを取り出す
///
/// 未指定または空白のみの場合は `"<field> is required"` を記録して `None` を返す。
fn require(value: Option<&str>, field: &'static str, errors: &mut ValidationErrors) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => {
            errors.add(field, format!("{field} is required"));
            None
        }
    }
}

/// ライドオファー入力を検証する
///
/// 必須フィールドは `destination`, `time`, `date`, `takeOffVenue`。
///
/// # Errors
///
/// 1 つ以上のフィールドが未指定または空の場合、違反したフィールドだけを含む
/// [`ValidationErrors`] を返す。
pub fn validate_ride_offer(payload: &RideOfferPayload) -> Result<RideOfferDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let destination = require(payload.destination.as_deref(), "destination", &mut errors);
    let time = require(payload.time.as_deref(), "time", &mut errors);
    let date = require(payload.date.as_deref(), "date", &mut errors);
    let take_off_venue = require(
        payload.take_off_venue.as_deref(),
        "takeOffVenue",
        &mut errors,
    );

    match (destination, time, date, take_off_venue) {
        (Some(destination), Some(time), Some(date), Some(take_off_venue)) => Ok(RideOfferDraft {
            take_off_venue,
            destination,
            date,
            time,
        }),
        _ => Err(errors),
    }
}
