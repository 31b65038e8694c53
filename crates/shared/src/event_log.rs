//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを追加する。
//! 定数は [`error`] モジュールで提供。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。呼び出し側のクレートは `tracing` に依存すること。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
/// - `event.actor_id`: 操作者 ID
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const RIDE: &str = "ride";
        pub const RIDE_REQUEST: &str = "ride_request";
    }

    /// イベントアクション
    pub mod action {
        pub const OFFER_CREATED: &str = "ride.offer_created";
        pub const REQUEST_CREATED: &str = "ride_request.created";
        pub const REQUEST_ACCEPTED: &str = "ride_request.accepted";
        pub const REQUEST_REJECTED: &str = "ride_request.rejected";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const RIDE_OFFER: &str = "ride_offer";
        pub const RIDE_REQUEST: &str = "ride_request";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB、Redis）
        pub const INFRASTRUCTURE: &str = "infrastructure";
        /// ストア側のルール違反
        pub const DOMAIN_RULE: &str = "domain_rule";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const ACCESS_TOKEN: &str = "access_token";
        pub const RULE_VIOLATION: &str = "rule_violation";
        pub const INTERNAL: &str = "internal";
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::fmt::MakeWriter;

    use super::event;

    /// 出力を文字列として捕捉するライター
    #[derive(Clone, Default)]
    struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_business_eventマーカーが付与される() {
        let writer = CapturedWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .flatten_event(true)
            .with_writer(writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            log_business_event!(
                event.category = event::category::RIDE_REQUEST,
                event.action = event::action::REQUEST_ACCEPTED,
                event.entity_id = 1,
                event.result = event::result::SUCCESS,
                "乗車リクエストを承諾"
            );
        });

        let output = String::from_utf8(writer.0.lock().unwrap().clone()).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(line["event.kind"], "business_event");
        assert_eq!(line["event.action"], "ride_request.accepted");
    }
}
