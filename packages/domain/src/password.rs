//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`PlainPassword`] | 登録・ログイン時の入力値 |
//! | [`PasswordHash`] | 永続化用のハッシュ値（PHC 文字列） |
//! | [`PasswordVerifyResult`] | パスワード検証の成否 |

use crate::DomainError;

/// 平文パスワード
///
/// Debug 出力ではパスワードの値をマスクする。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
   }
}

impl PlainPassword {
   /// 入力値からパスワードを作成する
   ///
   /// 空文字列は未入力として扱う。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();
      if value.is_empty() {
         return Err(DomainError::Validation("Password is required".to_string()));
      }
      Ok(Self(value))
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 確認用パスワードと一致するか
   ///
   /// 入力値同士の比較であり、ハッシュとの照合ではない。
   pub fn matches_confirmation(&self, confirmation: &str) -> bool {
      self.0 == confirmation
   }
}

/// パスワードハッシュ（永続化用）
///
/// Argon2id の PHC 文字列をラップする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ハッシュ文字列から作成する（主にデータベースからの復元時）
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
   Match,
   Mismatch,
}

impl PasswordVerifyResult {
   pub fn is_match(&self) -> bool {
      matches!(self, Self::Match)
   }

   pub fn is_mismatch(&self) -> bool {
      matches!(self, Self::Mismatch)
   }
}

impl From<bool> for PasswordVerifyResult {
   fn from(matched: bool) -> Self {
      if matched { Self::Match } else { Self::Mismatch }
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   fn test_平文パスワードを作成できる() {
      let password = PlainPassword::new("p1").unwrap();
      assert_eq!(password.as_str(), "p1");
   }

   #[rstest]
   fn test_空のパスワードは未入力エラー() {
      let result = PlainPassword::new("");
      assert_eq!(
         result.unwrap_err(),
         DomainError::Validation("Password is required".to_string())
      );
   }

   #[rstest]
   fn test_平文パスワードのdebug出力はマスクされる() {
      let password = PlainPassword::new("secret").unwrap();
      let debug = format!("{:?}", password);
      assert!(debug.contains("[REDACTED]"));
      assert!(!debug.contains("secret"));
   }

   #[rstest]
   #[case("p1", true)]
   #[case("p2", false)]
   #[case("", false)]
   #[case("P1", false)]
   fn test_確認用パスワードとの一致判定(#[case] confirmation: &str, #[case] expected: bool) {
      let password = PlainPassword::new("p1").unwrap();
      assert_eq!(password.matches_confirmation(confirmation), expected);
   }

   #[rstest]
   fn test_boolからの変換() {
      assert_eq!(PasswordVerifyResult::from(true), PasswordVerifyResult::Match);
      assert_eq!(
         PasswordVerifyResult::from(false),
         PasswordVerifyResult::Mismatch
      );
      assert!(PasswordVerifyResult::Match.is_match());
      assert!(PasswordVerifyResult::Mismatch.is_mismatch());
   }
}
