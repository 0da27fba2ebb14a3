//! # Correlation ID
//!
//! 1 リクエストに紐づくログ行をまとめて検索するための識別子。
//!
//! クライアントが `X-Correlation-ID` ヘッダを送ってきた場合はその値を引き継ぎ、
//! 無い場合はサーバー側で UUID v7 から生成する。

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation ID を運ぶ HTTP ヘッダ名
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// ヘッダ値として受け入れる最大長
///
/// これを超える値は破棄し、新しい ID を生成する。
const MAX_LENGTH: usize = 128;

/// リクエスト追跡用の識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(String);

impl CorrelationId {
   /// 新しい Correlation ID を生成する（UUID v7）
   pub fn new() -> Self {
      Self(Uuid::now_v7().to_string())
   }

   /// ヘッダ値から作成する
   ///
   /// 空文字列や長すぎる値は信用せず `None` を返す。
   pub fn from_header_value(value: &str) -> Option<Self> {
      let value = value.trim();
      if value.is_empty() || value.len() > MAX_LENGTH {
         return None;
      }
      Some(Self(value.to_string()))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }
}

impl Default for CorrelationId {
   fn default() -> Self {
      Self::new()
   }
}

impl fmt::Display for CorrelationId {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(&self.0)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::{assert_eq, assert_ne};

   use super::*;

   #[test]
   fn test_newは毎回異なるidを生成する() {
      assert_ne!(CorrelationId::new(), CorrelationId::new());
   }

   #[test]
   fn test_ヘッダ値を引き継ぐ() {
      let id = CorrelationId::from_header_value("  req-123 ").unwrap();
      assert_eq!(id.as_str(), "req-123");
   }

   #[test]
   fn test_空のヘッダ値は受け入れない() {
      assert!(CorrelationId::from_header_value("   ").is_none());
   }

   #[test]
   fn test_長すぎるヘッダ値は受け入れない() {
      let value = "a".repeat(MAX_LENGTH + 1);
      assert!(CorrelationId::from_header_value(&value).is_none());
   }

   #[test]
   fn test_displayは内部文字列をそのまま出力する() {
      let id = CorrelationId::from_header_value("display-test").unwrap();
      assert_eq!(id.to_string(), "display-test");
   }
}
