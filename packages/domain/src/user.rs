//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **不変性**: フィールドは非公開、変更は新しいインスタンスを返すメソッド経由
//! - **存在チェックのみ**: 値オブジェクトは空かどうかだけを検証する
//!   （形式チェックやサニタイズは行わない）
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use loginapi_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId, UserName},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     UserName::new("Ana")?,
//!     Email::new("a@x.com")?,
//!     PasswordHash::new("$argon2id$..."),
//!     chrono::Utc::now(),
//! );
//!
//! assert_eq!(user.email().as_str(), "a@x.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, password::PasswordHash};

/// ユーザー ID
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
   /// 新しいユーザー ID を生成する
   pub fn new() -> Self {
      Self(Uuid::now_v7())
   }

   pub fn from_uuid(uuid: Uuid) -> Self {
      Self(uuid)
   }

   /// 文字列（パスパラメータ、トークンのクレーム）からパースする
   pub fn parse(value: &str) -> Result<Self, DomainError> {
      Uuid::parse_str(value)
         .map(Self)
         .map_err(|_| DomainError::Validation(format!("Invalid user id: {value}")))
   }

   pub fn as_uuid(&self) -> &Uuid {
      &self.0
   }
}

impl Default for UserId {
   fn default() -> Self {
      Self::new()
   }
}

/// 空文字列を未入力として扱い、バリデーションエラーにする
///
/// 空白のみの値は入力ありとみなす。
fn require_present(value: String, message: &str) -> Result<String, DomainError> {
   if value.is_empty() {
      return Err(DomainError::Validation(message.to_string()));
   }
   Ok(value)
}

/// メールアドレス
///
/// 一意性はストア（UNIQUE 制約）が保証する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      require_present(value.into(), "Email is required").map(Self)
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

/// ユーザー名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserName(String);

impl UserName {
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      require_present(value.into(), "Name is required").map(Self)
   }

   pub fn as_str(&self) -> &str {
      &self.0
   }

   pub fn into_string(self) -> String {
      self.0
   }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` はストア全体で一意
/// - `password_hash` は常にハッシュ値であり、平文を保持しない
///
/// `Serialize` は実装しない。レスポンスには API 層で
/// パスワードハッシュを除いた表現を組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
   id:            UserId,
   name:          UserName,
   email:         Email,
   password_hash: PasswordHash,
   created_at:    DateTime<Utc>,
   updated_at:    DateTime<Utc>,
}

impl User {
   /// 新しいユーザーを作成する
   pub fn new(
      id: UserId,
      name: UserName,
      email: Email,
      password_hash: PasswordHash,
      now: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         name,
         email,
         password_hash,
         created_at: now,
         updated_at: now,
      }
   }

   /// 既存のデータからユーザーを復元する（データベースから取得時）
   pub fn from_db(
      id: UserId,
      name: UserName,
      email: Email,
      password_hash: PasswordHash,
      created_at: DateTime<Utc>,
      updated_at: DateTime<Utc>,
   ) -> Self {
      Self {
         id,
         name,
         email,
         password_hash,
         created_at,
         updated_at,
      }
   }

   pub fn id(&self) -> &UserId {
      &self.id
   }

   pub fn name(&self) -> &UserName {
      &self.name
   }

   pub fn email(&self) -> &Email {
      &self.email
   }

   pub fn password_hash(&self) -> &PasswordHash {
      &self.password_hash
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }

   pub fn updated_at(&self) -> DateTime<Utc> {
      self.updated_at
   }

   /// プロフィール（名前・メールアドレス）を部分更新した新しいインスタンスを返す
   ///
   /// `None` のフィールドは現在の値を維持する。
   pub fn with_profile(
      self,
      name: Option<UserName>,
      email: Option<Email>,
      now: DateTime<Utc>,
   ) -> Self {
      Self {
         name: name.unwrap_or(self.name),
         email: email.unwrap_or(self.email),
         updated_at: now,
         ..self
      }
   }
}
