//! # ベアラートークン
//!
//! ユーザー ID を埋め込んだ HS256 JWT の署名と検証を行う。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `id` | ユーザー ID（UUID 文字列） |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 有効期限（TTL 設定時のみ） |
//!
//! TTL 未設定のトークンは失効しない。ユーザーの削除や更新でも無効化されない。

use std::{collections::HashSet, time::Duration};

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use loginapi_domain::user::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// トークン操作のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
   /// 署名シークレットが設定されていない
   #[error("トークンの署名シークレットが設定されていません")]
   MissingSecret,

   /// 署名に失敗した
   #[error("トークンの署名に失敗しました: {0}")]
   Signing(String),

   /// 署名不正、形式不正、クレーム不正、期限切れ
   #[error("不正なトークンです: {0}")]
   InvalidToken(String),
}

/// トークンに埋め込むクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
   pub id:  String,
   pub iat: i64,
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub exp: Option<i64>,
}

/// トークンの署名・検証を担当するトレイト
pub trait TokenCodec: Send + Sync {
   /// ユーザー ID を埋め込んだトークンを発行する
   fn sign(&self, user_id: &UserId) -> Result<String, TokenError>;

   /// トークンを検証し、埋め込まれたユーザー ID を返す
   ///
   /// ユーザーが現存するかどうかは確認しない。
   fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

/// jsonwebtoken による HS256 実装
pub struct JwtTokenCodec {
   secret: Option<String>,
   ttl:    Option<Duration>,
}

impl JwtTokenCodec {
   /// シークレットが未設定でも構築はでき、署名・検証の呼び出し時にエラーになる
   pub fn new(secret: Option<String>, ttl: Option<Duration>) -> Self {
      let secret = secret.filter(|s| !s.is_empty());
      Self { secret, ttl }
   }

   fn secret(&self) -> Result<&[u8], TokenError> {
      self.secret
         .as_deref()
         .map(str::as_bytes)
         .ok_or(TokenError::MissingSecret)
   }

   fn validation(&self) -> Validation {
      let mut validation = Validation::new(Algorithm::HS256);
      validation.required_spec_claims = HashSet::new();
      validation.validate_exp = self.ttl.is_some();
      if self.ttl.is_some() {
         validation.required_spec_claims.insert("exp".to_string());
      }
      validation
   }
}

impl TokenCodec for JwtTokenCodec {
   fn sign(&self, user_id: &UserId) -> Result<String, TokenError> {
      let secret = self.secret()?;
      let now = Utc::now().timestamp();
      let exp = self
         .ttl
         .map(|ttl| now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)));

      let claims = Claims {
         id: user_id.to_string(),
         iat: now,
         exp,
      };

      encode(
         &Header::new(Algorithm::HS256),
         &claims,
         &EncodingKey::from_secret(secret),
      )
      .map_err(|e| TokenError::Signing(e.to_string()))
   }

   fn verify(&self, token: &str) -> Result<UserId, TokenError> {
      let secret = self.secret()?;
      let data = decode::<Claims>(
         token,
         &DecodingKey::from_secret(secret),
         &self.validation(),
      )
      .map_err(|e| TokenError::InvalidToken(e.to_string()))?;

      UserId::parse(&data.claims.id).map_err(|e| TokenError::InvalidToken(e.to_string()))
   }
}
