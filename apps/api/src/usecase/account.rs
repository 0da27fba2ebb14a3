//! # アカウントユースケース
//!
//! 登録・ログイン・取得・更新・削除を実装する。
//!
//! ## パスワード処理
//!
//! Argon2id のハッシュ化と検証は CPU バウンドのため、
//! `tokio::task::spawn_blocking` で blocking プールに逃がす。
//!
//! ## タイミング攻撃対策
//!
//! ログイン時にメールアドレスが未登録でもダミーハッシュで検証を実行し、
//! 処理時間からアカウントの存在が推測されないようにする。

use std::sync::Arc;

use async_trait::async_trait;
use loginapi_domain::{
   DomainError,
   clock::Clock,
   password::{PasswordHash, PasswordVerifyResult, PlainPassword},
   user::{Email, User, UserId, UserName},
};
use loginapi_infra::{
   InfraError,
   PasswordHasher,
   TokenCodec,
   password::DUMMY_HASH,
   repository::UserRepository,
};

use crate::{
   error::ApiError,
   usecase::{AccountUseCase, LoginInput, LoginOutput, RegisterInput, UpdateProfileInput},
};

const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
const ACCOUNT_NOT_FOUND: &str = "Account not found";
const USER_NOT_FOUND: &str = "User not found";
const LOGIN_SERVER_ERROR: &str = "Server error";

/// 書き込み時のインフラエラーを変換する
///
/// 一意制約違反はメールアドレス重複として 422 にする。
fn write_error(err: InfraError) -> ApiError {
   if err.is_conflict() {
      ApiError::Validation(EMAIL_ALREADY_EXISTS.to_string())
   } else {
      ApiError::internal(err)
   }
}

/// アカウントユースケースの実装
pub struct AccountUseCaseImpl {
   user_repository: Arc<dyn UserRepository>,
   password_hasher: Arc<dyn PasswordHasher>,
   token_codec:     Arc<dyn TokenCodec>,
   clock:           Arc<dyn Clock>,
}

impl AccountUseCaseImpl {
   /// 新しいユースケースインスタンスを作成
   pub fn new(
      user_repository: Arc<dyn UserRepository>,
      password_hasher: Arc<dyn PasswordHasher>,
      token_codec: Arc<dyn TokenCodec>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         user_repository,
         password_hasher,
         token_codec,
         clock,
      }
   }

   async fn hash_password(&self, password: PlainPassword) -> Result<PasswordHash, ApiError> {
      let hasher = Arc::clone(&self.password_hasher);
      tokio::task::spawn_blocking(move || hasher.hash(&password))
         .await
         .map_err(ApiError::internal)?
         .map_err(ApiError::internal)
   }

   async fn verify_password(
      &self,
      password: PlainPassword,
      hash: PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError> {
      let hasher = Arc::clone(&self.password_hasher);
      tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
         .await
         .map_err(|e| InfraError::unexpected(format!("検証タスクが失敗しました: {e}")))?
   }

   /// 処理時間を均一化するためのダミー検証
   async fn dummy_verification(&self, password: PlainPassword) {
      let _ = self
         .verify_password(password, PasswordHash::new(DUMMY_HASH))
         .await;
   }
}

/// 未送信・`null`・空文字列を除いた値を返す
fn present(value: Option<String>) -> Option<String> {
   value.filter(|v| !v.is_empty())
}

#[async_trait]
impl AccountUseCase for AccountUseCaseImpl {
   async fn register(&self, input: RegisterInput) -> Result<(), ApiError> {
      let name = UserName::new(input.name.unwrap_or_default())?;
      let email = Email::new(input.email.unwrap_or_default())?;
      let password = PlainPassword::new(input.password.unwrap_or_default())?;

      if !password.matches_confirmation(input.confirm_password.as_deref().unwrap_or_default()) {
         return Err(DomainError::Validation("Passwords are different".to_string()).into());
      }

      if self
         .user_repository
         .exists_by_email(&email)
         .await
         .map_err(ApiError::internal)?
      {
         return Err(ApiError::Validation(EMAIL_ALREADY_EXISTS.to_string()));
      }

      let password_hash = self.hash_password(password).await?;
      let user = User::new(UserId::new(), name, email, password_hash, self.clock.now());

      self.user_repository
         .insert(&user)
         .await
         .map_err(write_error)?;

      tracing::info!(user_id = %user.id(), "アカウントを作成しました");
      Ok(())
   }

   async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
      let email = Email::new(input.email.unwrap_or_default())?;
      let password = PlainPassword::new(input.password.unwrap_or_default())?;

      let user = self
         .user_repository
         .find_by_email(&email)
         .await
         .map_err(|e| ApiError::internal_with(LOGIN_SERVER_ERROR, e))?;

      let Some(user) = user else {
         self.dummy_verification(password).await;
         return Err(ApiError::Validation(ACCOUNT_NOT_FOUND.to_string()));
      };

      let result = self
         .verify_password(password, user.password_hash().clone())
         .await
         .map_err(|e| ApiError::internal_with(LOGIN_SERVER_ERROR, e))?;

      if result.is_mismatch() {
         return Err(ApiError::Validation("Invalid password".to_string()));
      }

      let token = self
         .token_codec
         .sign(user.id())
         .map_err(|e| ApiError::internal_with(LOGIN_SERVER_ERROR, e))?;

      tracing::info!(user_id = %user.id(), "ログインしました");
      Ok(LoginOutput {
         token,
         user_id: user.id().clone(),
      })
   }

   async fn fetch(&self, id: &UserId) -> Result<User, ApiError> {
      self.user_repository
         .find_by_id(id)
         .await
         .map_err(ApiError::internal)?
         .ok_or_else(|| ApiError::NotFound(ACCOUNT_NOT_FOUND.to_string()))
   }

   async fn update_profile(
      &self,
      id: &UserId,
      input: UpdateProfileInput,
   ) -> Result<User, ApiError> {
      let user = self
         .user_repository
         .find_by_id(id)
         .await
         .map_err(ApiError::internal)?
         .ok_or_else(|| ApiError::NotFound(USER_NOT_FOUND.to_string()))?;

      // 空文字列は未送信と同じく現在の値を維持する
      let name = present(input.name).map(UserName::new).transpose()?;
      let email = present(input.email).map(Email::new).transpose()?;
      let updated = user.with_profile(name, email, self.clock.now());

      let found = self
         .user_repository
         .update_profile(&updated)
         .await
         .map_err(write_error)?;
      if !found {
         return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
      }

      tracing::info!(user_id = %updated.id(), "プロフィールを更新しました");
      Ok(updated)
   }

   async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
      let deleted = self
         .user_repository
         .delete(id)
         .await
         .map_err(ApiError::internal)?;
      if !deleted {
         return Err(ApiError::NotFound(USER_NOT_FOUND.to_string()));
      }

      tracing::info!(user_id = %id, "アカウントを削除しました");
      Ok(())
   }
}
