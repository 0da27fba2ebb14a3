//! # ユーザーハンドラ
//!
//! ベアラートークンが必要なユーザー操作エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /user/{id}` - ユーザー取得
//! - `PUT /user/{id}` - プロフィール更新
//! - `DELETE /user/{id}` - ユーザー削除
//!
//! レスポンスにパスワードハッシュは含めない。

use std::sync::Arc;

use axum::{
   Extension,
   Json,
   extract::{Path, State, rejection::JsonRejection},
   response::IntoResponse,
};
use loginapi_domain::user::{User, UserId};
use loginapi_shared::MessageResponse;
use serde::{Deserialize, Serialize};

use super::account::{AccountState, parse_body};
use crate::{error::ApiError, middleware::AuthenticatedRequest, usecase::UpdateProfileInput};

// --- リクエスト/レスポンス型 ---

/// プロフィール更新リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
   pub name:  Option<String>,
   pub email: Option<String>,
}

/// ユーザーの公開表現
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
   pub id:    String,
   pub name:  String,
   pub email: String,
}

impl From<&User> for UserResponse {
   fn from(user: &User) -> Self {
      Self {
         id:    user.id().to_string(),
         name:  user.name().as_str().to_string(),
         email: user.email().as_str().to_string(),
      }
   }
}

/// ユーザー取得レスポンス
#[derive(Debug, Serialize)]
pub struct GetUserResponse {
   pub user: UserResponse,
}

/// プロフィール更新レスポンス
#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
   pub msg:  String,
   pub user: UserResponse,
}

/// パスの ID を解釈する。UUID でなければ存在しないユーザーとして扱う
fn parse_path_id(raw: &str, not_found: &str) -> Result<UserId, ApiError> {
   UserId::parse(raw).map_err(|_| ApiError::NotFound(not_found.to_string()))
}

// --- ハンドラ ---

/// GET /user/{id}
pub async fn get_user(
   State(state): State<Arc<AccountState>>,
   Extension(auth): Extension<AuthenticatedRequest>,
   Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
   state.subject_policy.check(&auth, &id)?;
   let id = parse_path_id(&id, "Account not found")?;

   let user = state.usecase.fetch(&id).await?;

   Ok(Json(GetUserResponse {
      user: UserResponse::from(&user),
   }))
}

/// PUT /user/{id}
///
/// 名前・メールアドレスを部分更新する。未送信または空のフィールドは現在の値を維持する。
pub async fn update_user(
   State(state): State<Arc<AccountState>>,
   Extension(auth): Extension<AuthenticatedRequest>,
   Path(id): Path<String>,
   payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
   state.subject_policy.check(&auth, &id)?;
   let id = parse_path_id(&id, "User not found")?;
   let req = parse_body(payload)?;

   let user = state
      .usecase
      .update_profile(
         &id,
         UpdateProfileInput {
            name:  req.name,
            email: req.email,
         },
      )
      .await?;

   Ok(Json(UpdateUserResponse {
      msg:  "User updated successfully".to_string(),
      user: UserResponse::from(&user),
   }))
}

/// DELETE /user/{id}
pub async fn delete_user(
   State(state): State<Arc<AccountState>>,
   Extension(auth): Extension<AuthenticatedRequest>,
   Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
   state.subject_policy.check(&auth, &id)?;
   let id = parse_path_id(&id, "User not found")?;

   state.usecase.delete(&id).await?;

   Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
   use chrono::Utc;
   use loginapi_domain::{
      password::PasswordHash,
      user::{Email, UserName},
   };
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   #[rstest]
   fn test_ユーザーの公開表現にパスワードハッシュを含まない() {
      let user = User::new(
         UserId::new(),
         UserName::new("Ana").unwrap(),
         Email::new("a@x.com").unwrap(),
         PasswordHash::new("$argon2id$secret-hash"),
         Utc::now(),
      );

      let json = serde_json::to_value(GetUserResponse {
         user: UserResponse::from(&user),
      })
      .unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "user": { "id": user.id().to_string(), "name": "Ana", "email": "a@x.com" }
         })
      );
      assert!(!json.to_string().contains("secret-hash"));
   }

   #[rstest]
   #[case("not-a-uuid")]
   #[case("64b7f0c2e4b0a1a2b3c4d5e6")]
   fn test_uuidでないパスidは見つからない扱い(#[case] raw: &str) {
      let err = parse_path_id(raw, "User not found").unwrap_err();

      assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "User not found"));
   }
}
