//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **メールアドレスの一意性**: `users.email` の UNIQUE 制約で保証し、
//!   違反は [`InfraError::conflict`] に変換する
//! - **物理削除**: 削除されたユーザーは行ごと消える

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use loginapi_domain::{
   password::PasswordHash,
   user::{Email, User, UserId, UserName},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// ID でユーザーを検索
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

   /// メールアドレスでユーザーを検索
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

   /// メールアドレスが登録済みかどうか
   async fn exists_by_email(&self, email: &Email) -> Result<bool, InfraError>;

   /// ユーザーを挿入する
   ///
   /// メールアドレスが重複する場合は `Conflict` を返す。
   async fn insert(&self, user: &User) -> Result<(), InfraError>;

   /// 名前・メールアドレス・更新日時を保存する
   ///
   /// 対象の行が存在しなければ `Ok(false)` を返す。
   /// 変更後のメールアドレスが他のユーザーと重複する場合は `Conflict` を返す。
   async fn update_profile(&self, user: &User) -> Result<bool, InfraError>;

   /// ユーザーを削除する
   ///
   /// 対象の行が存在しなければ `Ok(false)` を返す。
   async fn delete(&self, id: &UserId) -> Result<bool, InfraError>;
}

/// `users` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
   id:            Uuid,
   name:          String,
   email:         String,
   password_hash: String,
   created_at:    DateTime<Utc>,
   updated_at:    DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
   type Error = InfraError;

   fn try_from(row: UserRow) -> Result<Self, Self::Error> {
      Ok(User::from_db(
         UserId::from_uuid(row.id),
         UserName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
         Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
         PasswordHash::new(row.password_hash),
         row.created_at,
         row.updated_at,
      ))
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
      )
      .bind(email.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug")]
   async fn exists_by_email(&self, email: &Email) -> Result<bool, InfraError> {
      let (exists,): (bool,) =
         sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await?;

      Ok(exists)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %user.id()))]
   async fn insert(&self, user: &User) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
      )
      .bind(user.id().as_uuid())
      .bind(user.name().as_str())
      .bind(user.email().as_str())
      .bind(user.password_hash().as_str())
      .bind(user.created_at())
      .bind(user.updated_at())
      .execute(&self.pool)
      .await
      .map_err(|e| InfraError::from_write(e, "User", user.email().as_str()))?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %user.id()))]
   async fn update_profile(&self, user: &User) -> Result<bool, InfraError> {
      let result = sqlx::query(
         r#"
            UPDATE users
            SET name = $2, email = $3, updated_at = $4
            WHERE id = $1
            "#,
      )
      .bind(user.id().as_uuid())
      .bind(user.name().as_str())
      .bind(user.email().as_str())
      .bind(user.updated_at())
      .execute(&self.pool)
      .await
      .map_err(|e| InfraError::from_write(e, "User", user.email().as_str()))?;

      Ok(result.rows_affected() > 0)
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &UserId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM users WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
