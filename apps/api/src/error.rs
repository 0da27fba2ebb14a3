//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## レスポンス形式
//!
//! すべてのエラーは同じ形の JSON を返す:
//!
//! ```json
//! { "msg": "Email already exists" }
//! ```
//!
//! ## エラーの階層
//!
//! ```text
//! DomainError / InfraError / TokenError / AuthError
//!        ↓ 変換
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + {"msg"})
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use loginapi_domain::DomainError;
use loginapi_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
///
/// ハンドラ・ユースケースから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
///
/// | ApiError | HTTP Status |
/// |----------|-------------|
/// | Validation | 422 |
/// | NotFound | 404 |
/// | Unauthorized | 401 |
/// | BadToken | 400 |
/// | Forbidden | 403 |
/// | Internal | 500 |
#[derive(Debug, Error)]
pub enum ApiError {
   /// 入力値の不足・不一致、重複メールアドレス、認証情報の誤り
   #[error("{0}")]
   Validation(String),

   #[error("{0}")]
   NotFound(String),

   /// トークンが提示されていない
   #[error("{0}")]
   Unauthorized(String),

   /// トークンが検証できない
   #[error("{0}")]
   BadToken(String),

   /// トークンの主体とパスの ID が一致しない
   #[error("{0}")]
   Forbidden(String),

   /// 内部サーバーエラー
   ///
   /// `source` の詳細はサーバーサイドのログにのみ出力し、
   /// クライアントには `msg` だけを返す。
   #[error("{msg}")]
   Internal {
      msg:    String,
      #[source]
      source: anyhow::Error,
   },
}

impl ApiError {
   /// 汎用メッセージ（`Server error: try later`）の内部エラーを作る
   pub fn internal(source: impl Into<anyhow::Error>) -> Self {
      Self::Internal {
         msg:    ErrorResponse::server_error().msg,
         source: source.into(),
      }
   }

   /// メッセージを指定して内部エラーを作る
   pub fn internal_with(msg: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
      Self::Internal {
         msg:    msg.into(),
         source: source.into(),
      }
   }

   pub fn status(&self) -> StatusCode {
      match self {
         ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
         ApiError::NotFound(_) => StatusCode::NOT_FOUND,
         ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
         ApiError::BadToken(_) => StatusCode::BAD_REQUEST,
         ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
         ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DomainError> for ApiError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => ApiError::Validation(msg),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let status = self.status();
      let msg = match self {
         ApiError::Internal { msg, source } => {
            // 内部エラーの詳細はログにのみ出力
            tracing::error!(error = ?source, "内部エラー: {msg}");
            msg
         }
         ApiError::Validation(msg)
         | ApiError::NotFound(msg)
         | ApiError::Unauthorized(msg)
         | ApiError::BadToken(msg)
         | ApiError::Forbidden(msg) => msg,
      };

      (status, Json(ErrorResponse::new(msg))).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   async fn body_json(response: Response) -> serde_json::Value {
      let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
         .await
         .unwrap();
      serde_json::from_slice(&bytes).unwrap()
   }

   #[rstest]
   #[case(ApiError::Validation("Name is required".into()), StatusCode::UNPROCESSABLE_ENTITY)]
   #[case(ApiError::NotFound("User not found".into()), StatusCode::NOT_FOUND)]
   #[case(ApiError::Unauthorized("Access denied".into()), StatusCode::UNAUTHORIZED)]
   #[case(ApiError::BadToken("Invalid token".into()), StatusCode::BAD_REQUEST)]
   #[case(ApiError::Forbidden("Access forbidden".into()), StatusCode::FORBIDDEN)]
   #[tokio::test]
   async fn test_各バリアントがステータスとmsgに変換される(
      #[case] error: ApiError,
      #[case] expected: StatusCode,
   ) {
      let msg = error.to_string();

      let response = error.into_response();

      assert_eq!(response.status(), expected);
      assert_eq!(body_json(response).await, serde_json::json!({ "msg": msg }));
   }

   #[tokio::test]
   async fn test_内部エラーは詳細を隠して汎用メッセージを返す() {
      let error = ApiError::internal(anyhow::anyhow!("connection refused: db.internal:5432"));

      let response = error.into_response();

      assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "msg": "Server error: try later" })
      );
   }

   #[tokio::test]
   async fn test_内部エラーのメッセージを指定できる() {
      let error = ApiError::internal_with("Server error", anyhow::anyhow!("signing failed"));

      let response = error.into_response();

      assert_eq!(
         body_json(response).await,
         serde_json::json!({ "msg": "Server error" })
      );
   }

   #[test]
   fn test_ドメインエラーはバリデーションエラーになる() {
      let error = ApiError::from(DomainError::Validation("Email is required".into()));

      assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
      assert_eq!(error.to_string(), "Email is required");
   }
}
