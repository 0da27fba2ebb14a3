//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! ハッシュはソルトとパラメータを含む PHC 文字列形式で保存する:
//!
//! ```text
//! $argon2id$v=19$m=65536,t=1,p=1$<salt>$<hash>
//! ```
//!
//! どちらの操作も CPU バウンドのため、非同期コンテキストからは
//! `tokio::task::spawn_blocking` 経由で呼び出すこと。

use argon2::{
   Argon2,
   Params,
   PasswordHasher as _,
   PasswordVerifier as _,
   password_hash::{PasswordHash as Argon2PasswordHash, SaltString},
};
use loginapi_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};
use rand_core::OsRng;

use crate::InfraError;

/// ユーザー不在時のタイミング攻撃対策に使うダミーハッシュ
///
/// 本物と同じパラメータで生成した有効な PHC 文字列。検証結果は常に破棄される。
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordHasher: Send + Sync {
   /// パスワードをハッシュ化する
   ///
   /// 呼び出しごとに新しいソルトを生成するため、同じ入力でも結果は毎回異なる。
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

   /// パスワードを検証する
   ///
   /// # Errors
   ///
   /// - 不正なハッシュ形式の場合
   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id による実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordHasher {
   argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
   pub fn new() -> Self {
      // 固定値のため失敗しないが、万一の場合はライブラリ既定値にフォールバックする
      let params = Params::new(
         65536, // memory (KB) = 64 MB
         1,     // iterations
         1,     // parallelism
         None,  // output length (default: 32)
      )
      .unwrap_or_default();

      Self {
         argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
      }
   }
}

impl Default for Argon2PasswordHasher {
   fn default() -> Self {
      Self::new()
   }
}

impl PasswordHasher for Argon2PasswordHasher {
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
      let salt = SaltString::generate(&mut OsRng);
      let hashed = self
         .argon2
         .hash_password(password.as_str().as_bytes(), &salt)
         .map_err(|e| InfraError::password_hash(format!("ハッシュ化に失敗: {e}")))?;

      Ok(PasswordHash::new(hashed.to_string()))
   }

   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError> {
      let parsed = Argon2PasswordHash::new(hash.as_str())
         .map_err(|e| InfraError::password_hash(format!("不正なハッシュ形式: {e}")))?;

      let matched = self
         .argon2
         .verify_password(password.as_str().as_bytes(), &parsed)
         .is_ok();

      Ok(PasswordVerifyResult::from(matched))
   }
}

#[cfg(test)]
mod tests {
   use rstest::{fixture, rstest};

   use super::*;

   #[fixture]
   fn hasher() -> Argon2PasswordHasher {
      Argon2PasswordHasher::new()
   }

   #[rstest]
   fn test_ハッシュ化したパスワードを検証できる(hasher: Argon2PasswordHasher) {
      let password = PlainPassword::new("p1").unwrap();

      let hash = hasher.hash(&password).unwrap();
      let result = hasher.verify(&password, &hash).unwrap();

      assert!(result.is_match());
   }

   #[rstest]
   fn test_異なるパスワードは不一致(hasher: Argon2PasswordHasher) {
      let hash = hasher.hash(&PlainPassword::new("p1").unwrap()).unwrap();

      let result = hasher
         .verify(&PlainPassword::new("wrong").unwrap(), &hash)
         .unwrap();

      assert!(result.is_mismatch());
   }

   #[rstest]
   fn test_同じパスワードでもソルトが異なるためハッシュは毎回変わる(
      hasher: Argon2PasswordHasher,
   ) {
      let password = PlainPassword::new("p1").unwrap();

      let first = hasher.hash(&password).unwrap();
      let second = hasher.hash(&password).unwrap();

      assert_ne!(first, second);
   }

   #[rstest]
   fn test_ハッシュはphc形式で平文を含まない(hasher: Argon2PasswordHasher) {
      let hash = hasher.hash(&PlainPassword::new("p1-secret").unwrap()).unwrap();

      assert!(hash.as_str().starts_with("$argon2id$v=19$m=65536,t=1,p=1$"));
      assert!(!hash.as_str().contains("p1-secret"));
   }

   #[rstest]
   fn test_ダミーハッシュはパースできて入力と一致しない(hasher: Argon2PasswordHasher) {
      let result = hasher
         .verify(
            &PlainPassword::new("p1").unwrap(),
            &PasswordHash::new(DUMMY_HASH),
         )
         .unwrap();

      assert!(result.is_mismatch());
   }

   #[rstest]
   fn test_不正なハッシュ形式はエラー(hasher: Argon2PasswordHasher) {
      let result = hasher.verify(
         &PlainPassword::new("p1").unwrap(),
         &PasswordHash::new("not-a-valid-hash"),
      );

      assert!(result.is_err());
   }
}
