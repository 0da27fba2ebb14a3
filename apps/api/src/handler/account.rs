//! # アカウントハンドラ
//!
//! 認証不要のアカウント操作エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /auth/register` - アカウント登録
//! - `POST /auth/login` - ログイン（トークン発行）

use std::sync::Arc;

use axum::{
   Json,
   extract::{State, rejection::JsonRejection},
   http::StatusCode,
   response::IntoResponse,
};
use loginapi_shared::MessageResponse;
use serde::{Deserialize, Serialize};

use crate::{
   error::ApiError,
   middleware::SubjectPolicy,
   usecase::{AccountUseCase, LoginInput, RegisterInput},
};

/// アカウントハンドラの共有状態
pub struct AccountState {
   pub usecase:        Arc<dyn AccountUseCase>,
   pub subject_policy: SubjectPolicy,
}

/// リクエストボディを取り出す
///
/// JSON の `Content-Type` が無い（ボディ無しを含む）場合は全フィールド未送信として扱う。
/// JSON として解釈できないボディは `{msg}` 形式の 422 にする。
pub(crate) fn parse_body<T: Default>(
   payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
   match payload {
      Ok(Json(body)) => Ok(body),
      Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
      Err(rejection) => {
         tracing::debug!(error = %rejection, "リクエストボディを解釈できません");
         Err(ApiError::Validation("Invalid request body".to_string()))
      }
   }
}

// --- リクエスト/レスポンス型 ---

/// 登録リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
   pub name:            Option<String>,
   pub email:           Option<String>,
   pub password:        Option<String>,
   #[serde(alias = "confirmPassword")]
   pub confirmpassword: Option<String>,
}

/// ログインリクエスト
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
   pub email:    Option<String>,
   pub password: Option<String>,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct LoginResponse {
   pub msg:     String,
   pub token:   String,
   #[serde(rename = "userId")]
   pub user_id: String,
}

// --- ハンドラ ---

/// POST /auth/register
///
/// アカウントを登録する。成功時は 201 Created。
pub async fn register(
   State(state): State<Arc<AccountState>>,
   payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
   let req = parse_body(payload)?;

   state
      .usecase
      .register(RegisterInput {
         name:             req.name,
         email:            req.email,
         password:         req.password,
         confirm_password: req.confirmpassword,
      })
      .await?;

   Ok((
      StatusCode::CREATED,
      Json(MessageResponse::new("Account has been created")),
   ))
}

/// POST /auth/login
///
/// メールアドレスとパスワードで認証し、ベアラートークンを返す。
pub async fn login(
   State(state): State<Arc<AccountState>>,
   payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
   let req = parse_body(payload)?;

   let output = state
      .usecase
      .login(LoginInput {
         email:    req.email,
         password: req.password,
      })
      .await?;

   Ok(Json(LoginResponse {
      msg:     "Authentication completed".to_string(),
      token:   output.token,
      user_id: output.user_id.to_string(),
   }))
}

#[cfg(test)]
mod tests {
   use std::sync::{Arc, Mutex};

   use async_trait::async_trait;
   use axum::{
      Router,
      body::Body,
      http::{Method, Request},
      routing::post,
   };
   use loginapi_domain::user::{User, UserId};
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use tower::ServiceExt;

   use super::*;
   use crate::usecase::{LoginOutput, UpdateProfileInput};

   // テスト用スタブ
   #[derive(Default)]
   struct StubAccountUseCase {
      received: Mutex<Option<RegisterInput>>,
   }

   #[async_trait]
   impl AccountUseCase for StubAccountUseCase {
      async fn register(&self, input: RegisterInput) -> Result<(), ApiError> {
         *self.received.lock().unwrap() = Some(input);
         Ok(())
      }

      async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
         if input.password.as_deref() == Some("p1") {
            Ok(LoginOutput {
               token:   "stub-token".to_string(),
               user_id: UserId::new(),
            })
         } else {
            Err(ApiError::Validation("Invalid password".to_string()))
         }
      }

      async fn fetch(&self, _id: &UserId) -> Result<User, ApiError> {
         Err(ApiError::NotFound("Account not found".to_string()))
      }

      async fn update_profile(
         &self,
         _id: &UserId,
         _input: UpdateProfileInput,
      ) -> Result<User, ApiError> {
         Err(ApiError::NotFound("User not found".to_string()))
      }

      async fn delete(&self, _id: &UserId) -> Result<(), ApiError> {
         Ok(())
      }
   }

   fn create_test_app(usecase: Arc<StubAccountUseCase>) -> Router {
      let state = Arc::new(AccountState {
         usecase,
         subject_policy: SubjectPolicy::Unchecked,
      });

      Router::new()
         .route("/auth/register", post(register))
         .route("/auth/login", post(login))
         .with_state(state)
   }

   fn json_request(uri: &str, body: &str) -> Request<Body> {
      Request::builder()
         .method(Method::POST)
         .uri(uri)
         .header("content-type", "application/json")
         .body(Body::from(body.to_string()))
         .unwrap()
   }

   async fn body_json(response: axum::response::Response) -> serde_json::Value {
      let body = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&body).unwrap()
   }

   #[rstest]
   #[case("confirmpassword")]
   #[case("confirmPassword")]
   #[tokio::test]
   async fn test_register_確認用パスワードは両方の綴りを受け付ける(#[case] key: &str) {
      // Given
      let usecase = Arc::new(StubAccountUseCase::default());
      let sut = create_test_app(usecase.clone());
      let mut body = serde_json::json!({
         "name": "Ana",
         "email": "a@x.com",
         "password": "p1",
      });
      body[key] = serde_json::json!("p1");

      // When
      let response = sut
         .oneshot(json_request("/auth/register", &body.to_string()))
         .await
         .unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::CREATED);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "msg": "Account has been created" })
      );
      let received = usecase.received.lock().unwrap().clone().unwrap();
      assert_eq!(received.confirm_password.as_deref(), Some("p1"));
   }

   #[rstest]
   #[tokio::test]
   async fn test_register_nullのフィールドは未送信として渡す() {
      // Given
      let usecase = Arc::new(StubAccountUseCase::default());
      let sut = create_test_app(usecase.clone());

      // When
      let response = sut
         .oneshot(json_request("/auth/register", r#"{"name":null}"#))
         .await
         .unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::CREATED);
      let received = usecase.received.lock().unwrap().clone().unwrap();
      assert_eq!(received.name, None);
      assert_eq!(received.email, None);
   }

   #[rstest]
   #[tokio::test]
   async fn test_register_ボディ無しは全フィールド未送信として渡す() {
      // Given
      let usecase = Arc::new(StubAccountUseCase::default());
      let sut = create_test_app(usecase.clone());
      let request = Request::builder()
         .method(Method::POST)
         .uri("/auth/register")
         .body(Body::empty())
         .unwrap();

      // When
      let response = sut.oneshot(request).await.unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::CREATED);
      let received = usecase.received.lock().unwrap().clone().unwrap();
      assert_eq!(received.name, None);
      assert_eq!(received.password, None);
      assert_eq!(received.confirm_password, None);
   }

   #[rstest]
   #[case("/auth/register", "{not json")]
   #[case("/auth/login", "[1, 2]")]
   #[case("/auth/login", r#"{"email": 1}"#)]
   #[tokio::test]
   async fn test_解釈できないボディは422(#[case] uri: &str, #[case] body: &str) {
      // Given
      let sut = create_test_app(Arc::new(StubAccountUseCase::default()));

      // When
      let response = sut.oneshot(json_request(uri, body)).await.unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "msg": "Invalid request body" })
      );
   }

   #[rstest]
   #[tokio::test]
   async fn test_login_成功時はトークンとuser_idを返す() {
      // Given
      let sut = create_test_app(Arc::new(StubAccountUseCase::default()));

      // When
      let response = sut
         .oneshot(json_request(
            "/auth/login",
            r#"{"email":"a@x.com","password":"p1"}"#,
         ))
         .await
         .unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::OK);
      let json = body_json(response).await;
      assert_eq!(json["msg"], "Authentication completed");
      assert_eq!(json["token"], "stub-token");
      assert!(json["userId"].is_string());
   }

   #[rstest]
   #[tokio::test]
   async fn test_login_ユースケースのエラーをそのまま返す() {
      // Given
      let sut = create_test_app(Arc::new(StubAccountUseCase::default()));

      // When
      let response = sut
         .oneshot(json_request(
            "/auth/login",
            r#"{"email":"a@x.com","password":"wrong"}"#,
         ))
         .await
         .unwrap();

      // Then
      assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "msg": "Invalid password" })
      );
   }
}
