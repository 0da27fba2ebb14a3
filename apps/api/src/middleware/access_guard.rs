//! # アクセスガード
//!
//! `Authorization: Bearer <token>` を検証し、保護されたルートへのアクセスを制御する。
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let guard = AccessGuardState { token_codec };
//!
//! Router::new()
//!     .route("/user/{id}", get(get_user))
//!     .route_layer(from_fn_with_state(guard, require_bearer))
//! ```
//!
//! 検証に成功すると [`AuthenticatedRequest`] をリクエストの extensions に格納する。
//! ハンドラは `Extension<AuthenticatedRequest>` で取り出す。

use std::sync::Arc;

use axum::{
   body::Body,
   extract::State,
   http::{HeaderMap, Request, header::AUTHORIZATION},
   middleware::Next,
   response::{IntoResponse, Response},
};
use loginapi_domain::user::UserId;
use loginapi_infra::TokenCodec;
use thiserror::Error;

use crate::error::ApiError;

/// 認証済みリクエストの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedRequest {
   /// トークンに埋め込まれたユーザー ID
   pub subject: UserId,
}

/// アクセスガードのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
   /// ヘッダなし、Bearer 以外のスキーム、空のトークン
   #[error("Access denied")]
   MissingToken,

   /// 署名不正、形式不正、期限切れ、シークレット未設定
   #[error("Invalid token")]
   BadToken,

   /// トークンの主体とパスの ID が一致しない
   #[error("Access forbidden")]
   Forbidden,
}

impl From<AuthError> for ApiError {
   fn from(err: AuthError) -> Self {
      let msg = err.to_string();
      match err {
         AuthError::MissingToken => ApiError::Unauthorized(msg),
         AuthError::BadToken => ApiError::BadToken(msg),
         AuthError::Forbidden => ApiError::Forbidden(msg),
      }
   }
}

impl IntoResponse for AuthError {
   fn into_response(self) -> Response {
      ApiError::from(self).into_response()
   }
}

/// トークンの主体とパスの ID の照合方針
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubjectPolicy {
   /// 有効なトークンであれば任意の ID を操作できる
   #[default]
   Unchecked,
   /// トークンの主体とパスの ID が一致する場合のみ許可する
   MustMatchPath,
}

impl SubjectPolicy {
   /// 設定値（`true` / `1` / `yes`）から方針を決める
   pub fn from_flag(value: &str) -> Self {
      match value.trim().to_ascii_lowercase().as_str() {
         "true" | "1" | "yes" => Self::MustMatchPath,
         _ => Self::Unchecked,
      }
   }

   /// パスの ID に対する操作を許可するか判定する
   ///
   /// `MustMatchPath` では UUID として解釈できない ID も不一致として扱う。
   pub fn check(self, auth: &AuthenticatedRequest, path_id: &str) -> Result<(), AuthError> {
      match self {
         Self::Unchecked => Ok(()),
         Self::MustMatchPath => match UserId::parse(path_id) {
            Ok(id) if id == auth.subject => Ok(()),
            _ => Err(AuthError::Forbidden),
         },
      }
   }
}

/// `Authorization` ヘッダからベアラートークンを取り出す
///
/// スキームは大文字小文字を区別しない。最初の空白以降をトークンとみなす。
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
   let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
   let (scheme, token) = value.trim().split_once(' ')?;
   if !scheme.eq_ignore_ascii_case("Bearer") {
      return None;
   }
   let token = token.trim();
   (!token.is_empty()).then_some(token)
}

/// リクエストヘッダを検証し、認証済みリクエストを返す
///
/// トークンが示すユーザーが現存するかどうかは確認しない。
pub fn authenticate(
   headers: &HeaderMap,
   codec: &dyn TokenCodec,
) -> Result<AuthenticatedRequest, AuthError> {
   let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

   let subject = codec.verify(token).map_err(|e| {
      tracing::debug!(error = %e, "トークンの検証に失敗しました");
      AuthError::BadToken
   })?;

   Ok(AuthenticatedRequest { subject })
}

/// アクセスガードの状態
#[derive(Clone)]
pub struct AccessGuardState {
   pub token_codec: Arc<dyn TokenCodec>,
}

/// アクセスガードミドルウェア
///
/// 検証に失敗した場合はハンドラを呼ばずにエラーレスポンスを返す。
pub async fn require_bearer(
   State(state): State<AccessGuardState>,
   mut request: Request<Body>,
   next: Next,
) -> Response {
   match authenticate(request.headers(), state.token_codec.as_ref()) {
      Ok(auth) => {
         request.extensions_mut().insert(auth);
         next.run(request).await
      }
      Err(e) => e.into_response(),
   }
}
