//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成やエンティティ操作で発生するエラー。
//! API 層でこのエラーを受け取り、HTTP レスポンスに変換する。
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 422 Unprocessable Entity |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// メッセージはそのままクライアントに返せる英語の短文とする
   /// （例: `"Email is required"`）。
   #[error("{0}")]
   Validation(String),
}
