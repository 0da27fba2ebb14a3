//! # エラーレスポンス
//!
//! すべてのエラーレスポンスで共通の JSON ボディ。
//!
//! ```json
//! { "msg": "Access denied" }
//! ```
//!
//! ステータスコードとの組み合わせは API 層の責務とし、
//! このクレートには axum への依存を入れない。

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// クライアントには短い人間可読メッセージだけを返す。
/// エラーコードや内部情報は含めない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub msg: String,
}

impl ErrorResponse {
   pub fn new(msg: impl Into<String>) -> Self {
      Self { msg: msg.into() }
   }

   /// 500 系で使う汎用メッセージ
   ///
   /// 内部エラーの詳細はログにのみ出力する。
   pub fn server_error() -> Self {
      Self::new("Server error: try later")
   }
}
