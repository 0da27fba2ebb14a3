//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! loginapi-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use loginapi_domain::{
   password::{PasswordHash, PasswordVerifyResult, PlainPassword},
   user::{Email, User, UserId},
};

use crate::{error::InfraError, password::PasswordHasher, repository::UserRepository};

// ===== MockUserRepository =====

/// インメモリのユーザーリポジトリ
///
/// PostgreSQL の UNIQUE 制約と同じく、メールアドレスの重複を `Conflict` で拒否する。
#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 保存されているユーザー数
   pub fn count(&self) -> usize {
      self.users.lock().unwrap().len()
   }

   /// メールアドレスが一致するユーザー数
   pub fn count_by_email(&self, email: &str) -> usize {
      self
         .users
         .lock()
         .unwrap()
         .iter()
         .filter(|u| u.email().as_str() == email)
         .count()
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id() == id)
         .cloned())
   }

   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.email() == email)
         .cloned())
   }

   async fn exists_by_email(&self, email: &Email) -> Result<bool, InfraError> {
      Ok(self.users.lock().unwrap().iter().any(|u| u.email() == email))
   }

   async fn insert(&self, user: &User) -> Result<(), InfraError> {
      let mut users = self.users.lock().unwrap();
      if users.iter().any(|u| u.email() == user.email()) {
         return Err(InfraError::conflict("User", user.email().as_str()));
      }
      users.push(user.clone());
      Ok(())
   }

   async fn update_profile(&self, user: &User) -> Result<bool, InfraError> {
      let mut users = self.users.lock().unwrap();
      if users
         .iter()
         .any(|u| u.id() != user.id() && u.email() == user.email())
      {
         return Err(InfraError::conflict("User", user.email().as_str()));
      }
      match users.iter_mut().find(|u| u.id() == user.id()) {
         Some(existing) => {
            *existing = user.clone();
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: &UserId) -> Result<bool, InfraError> {
      let mut users = self.users.lock().unwrap();
      let before = users.len();
      users.retain(|u| u.id() != id);
      Ok(users.len() < before)
   }
}

// ===== MockPasswordHasher =====

/// 計算コストのないパスワードハッシャー
///
/// `mock$<平文>` をハッシュとして扱う。ソルトを持たないため同じ入力は同じ結果になる。
#[derive(Clone, Copy, Default)]
pub struct MockPasswordHasher;

impl MockPasswordHasher {
   const PREFIX: &'static str = "mock$";
}

impl PasswordHasher for MockPasswordHasher {
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
      Ok(PasswordHash::new(format!(
         "{}{}",
         Self::PREFIX,
         password.as_str()
      )))
   }

   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError> {
      let Some(stored) = hash.as_str().strip_prefix(Self::PREFIX) else {
         // 本番のダミーハッシュなどモック形式でないものは常に不一致
         return Ok(PasswordVerifyResult::Mismatch);
      };
      Ok(PasswordVerifyResult::from(stored == password.as_str()))
   }
}

#[cfg(test)]
mod tests {
   use chrono::Utc;
   use loginapi_domain::user::UserName;
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn user(email: &str) -> User {
      User::new(
         UserId::new(),
         UserName::new("Ana").unwrap(),
         Email::new(email).unwrap(),
         PasswordHash::new("mock$p1"),
         Utc::now(),
      )
   }

   #[rstest]
   #[tokio::test]
   async fn test_同じメールアドレスの挿入は競合になる() {
      let sut = MockUserRepository::new();
      sut.insert(&user("a@x.com")).await.unwrap();

      let result = sut.insert(&user("a@x.com")).await;

      assert!(result.unwrap_err().is_conflict());
      assert_eq!(sut.count_by_email("a@x.com"), 1);
   }

   #[rstest]
   #[tokio::test]
   async fn test_他ユーザーのメールアドレスへの更新は競合になる() {
      let sut = MockUserRepository::new();
      let ana = user("a@x.com");
      sut.insert(&ana).await.unwrap();
      sut.insert(&user("b@x.com")).await.unwrap();

      let changed = ana.with_profile(None, Some(Email::new("b@x.com").unwrap()), Utc::now());
      let result = sut.update_profile(&changed).await;

      assert!(result.unwrap_err().is_conflict());
   }

   #[rstest]
   #[tokio::test]
   async fn test_存在しないユーザーの削除はfalse() {
      let sut = MockUserRepository::new();

      assert!(!sut.delete(&UserId::new()).await.unwrap());
   }

   #[rstest]
   fn test_モックハッシャーは平文が一致すれば一致() {
      let sut = MockPasswordHasher;
      let hash = sut.hash(&PlainPassword::new("p1").unwrap()).unwrap();

      assert!(
         sut.verify(&PlainPassword::new("p1").unwrap(), &hash)
            .unwrap()
            .is_match()
      );
      assert!(
         sut.verify(&PlainPassword::new("p2").unwrap(), &hash)
            .unwrap()
            .is_mismatch()
      );
   }
}
