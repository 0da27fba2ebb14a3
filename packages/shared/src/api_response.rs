//! # 成功レスポンス
//!
//! メッセージのみを返す成功レスポンス（登録完了、削除完了など）。

use serde::{Deserialize, Serialize};

/// `{ "msg": "..." }` 形式の成功レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
   pub msg: String,
}

impl MessageResponse {
   pub fn new(msg: impl Into<String>) -> Self {
      Self { msg: msg.into() }
   }
}
