//! # ユーザー識別子
//!
//! ドライバー（オファー所有者）と乗客（リクエスト送信者）を区別せず、
//! 外部の認証基盤が解決した呼び出し元の識別子だけを扱う。
//! ユーザーのプロフィールや認証情報はこのシステムの責務外。

define_uuid_id! {
    /// ユーザー ID
    ///
    /// アクセストークンから解決される呼び出し元の識別子。
    /// UUID v7 を使用し、生成順にソート可能。
    pub struct UserId;
}
