//! # インフラ層エラー定義
//!
//! データベース、パスワードハッシュなど外部ライブラリとのやり取りで発生するエラー。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! `From<sqlx::Error>` や convenience constructor でエラーを生成すると、
//! その時点のスパン情報が自動的にキャプチャされる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// データベースエラー
   ///
   /// SQL の実行失敗、接続エラーなど。一意制約違反は [`Conflict`](Self::Conflict) に変換済み。
   #[error("データベースエラー: {0}")]
   Database(#[source] sqlx::Error),

   /// 一意制約違反
   ///
   /// 同じメールアドレスでの同時登録など、ストアが書き込みを拒否した場合。
   #[error("競合が発生しました: {entity}({key})")]
   Conflict {
      /// エンティティ名（例: "User"）
      entity: String,
      /// 衝突したキー
      key:    String,
   },

   /// パスワードハッシュの生成・解析エラー
   #[error("パスワードハッシュエラー: {0}")]
   PasswordHash(String),

   /// 予期しないエラー
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl InfraError {
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// 一意制約違反かどうか
   pub fn is_conflict(&self) -> bool {
      matches!(self.kind, InfraErrorKind::Conflict { .. })
   }

   fn with_kind(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   // ===== Convenience constructors =====

   pub fn conflict(entity: impl Into<String>, key: impl Into<String>) -> Self {
      Self::with_kind(InfraErrorKind::Conflict {
         entity: entity.into(),
         key:    key.into(),
      })
   }

   pub fn password_hash(msg: impl Into<String>) -> Self {
      Self::with_kind(InfraErrorKind::PasswordHash(msg.into()))
   }

   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::with_kind(InfraErrorKind::Unexpected(msg.into()))
   }

   /// 書き込み系クエリのエラーを変換する
   ///
   /// 一意制約違反は `Conflict` に、それ以外は `Database` になる。
   pub fn from_write(source: sqlx::Error, entity: &str, key: &str) -> Self {
      match &source {
         sqlx::Error::Database(db) if db.is_unique_violation() => Self::conflict(entity, key),
         _ => source.into(),
      }
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

impl From<sqlx::Error> for InfraError {
   fn from(source: sqlx::Error) -> Self {
      Self::with_kind(InfraErrorKind::Database(source))
   }
}
