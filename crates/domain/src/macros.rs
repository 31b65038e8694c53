/// UUID v7 ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`Uuid` をラップ）
/// - `derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)`
/// - `new()`: UUID v7 を生成
/// - `from_uuid()`: 既存 UUID から復元
/// - `as_uuid()`: 内部 UUID への参照
/// - `Default` impl（`new()` に委譲）
///
/// # 使用例
///
/// ```rust
/// use ridesharing_domain::user::UserId;
/// use uuid::Uuid;
///
/// let id = UserId::new();
/// let uuid = id.as_uuid();
/// let restored = UserId::from_uuid(*uuid);
/// assert_eq!(id, restored);
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Name(uuid::Uuid);

        impl $Name {
            /// 新しい ID を生成する（UUID v7）
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            /// 既存の UUID から ID を作成する
            pub fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// 内部の UUID 参照を取得する
            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// ストアが採番する正整数 ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`i64` をラップ、1 以上）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display)`
/// - `new()`: 1 以上の値から作成（DB 復元用）
/// - `parse()`: パスパラメータ等の生テキストを正準形式として検証して作成
/// - `as_i64()`: 内部値の取得
///
/// `parse()` が受け付けるのは符号・先頭ゼロ・小数点を含まない
/// ASCII 数字列のみ。`"4jsa"`, `"-1"`, `"1.5"`, `"01"` はすべて
/// `DomainError::InvalidIdentifier` になる。
///
/// # 使用例
///
/// ```rust
/// use ridesharing_domain::ride::RideId;
///
/// let id = RideId::parse("42").unwrap();
/// assert_eq!(id.as_i64(), 42);
/// assert!(RideId::parse("4jsa").is_err());
/// ```
macro_rules! define_positive_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            entity_type: $entity_type:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        #[serde(transparent)]
        $vis struct $Name(i64);

        impl $Name {
            /// 1 以上の値から ID を作成する
            pub fn new(value: i64) -> Result<Self, $crate::DomainError> {
                if value <= 0 {
                    return Err($crate::DomainError::InvalidIdentifier {
                        entity_type: $entity_type,
                        value:       value.to_string(),
                    });
                }
                Ok(Self(value))
            }

            /// 生テキストを正準形式の正整数として検証し、ID を作成する
            pub fn parse(raw: &str) -> Result<Self, $crate::DomainError> {
                let invalid = || $crate::DomainError::InvalidIdentifier {
                    entity_type: $entity_type,
                    value:       raw.to_string(),
                };

                if !$crate::macros::is_canonical_positive_integer(raw) {
                    return Err(invalid());
                }

                raw.parse::<i64>().map($Name).map_err(|_| invalid())
            }

            /// 内部の i64 値を取得する
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $Name {
            type Error = $crate::DomainError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

/// 正準形式の正整数テキストか判定する
///
/// 空文字、先頭ゼロ、数字以外の文字を含むものは偽。
/// 桁あふれの判定は呼び出し側の `parse::<i64>()` に任せる。
pub(crate) fn is_canonical_positive_integer(raw: &str) -> bool {
    !raw.is_empty() && !raw.starts_with('0') && raw.bytes().all(|b| b.is_ascii_digit())
}
