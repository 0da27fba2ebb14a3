//! # ユースケース層
//!
//! アカウント操作のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリ、パスワードハッシャー、トークン、時刻を外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod account;

pub use account::AccountUseCaseImpl;
use async_trait::async_trait;
use loginapi_domain::user::{User, UserId};

use crate::error::ApiError;

/// 登録の入力
///
/// 各フィールドは未送信・`null` を `None` で表す。
#[derive(Debug, Clone, Default)]
pub struct RegisterInput {
   pub name:             Option<String>,
   pub email:            Option<String>,
   pub password:         Option<String>,
   pub confirm_password: Option<String>,
}

/// ログインの入力
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
   pub email:    Option<String>,
   pub password: Option<String>,
}

/// ログインの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutput {
   pub token:   String,
   pub user_id: UserId,
}

/// プロフィール更新の入力
///
/// `None` や空文字列のフィールドは現在の値を維持する。
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
   pub name:  Option<String>,
   pub email: Option<String>,
}

/// アカウントユースケーストレイト
///
/// 具体的な実装は [`AccountUseCaseImpl`] で提供される。
#[async_trait]
pub trait AccountUseCase: Send + Sync {
   /// アカウントを登録する
   ///
   /// ## エラー
   ///
   /// - 入力値の不足、確認用パスワードの不一致、登録済みのメールアドレス: `Validation`
   /// - 保存・ハッシュ化の失敗: `Internal`
   async fn register(&self, input: RegisterInput) -> Result<(), ApiError>;

   /// メールアドレスとパスワードで認証し、トークンを発行する
   ///
   /// ## エラー
   ///
   /// - 入力値の不足、未登録のメールアドレス、パスワードの誤り: `Validation`
   /// - 検索・署名の失敗: `Internal`
   async fn login(&self, input: LoginInput) -> Result<LoginOutput, ApiError>;

   /// ユーザーを取得する
   async fn fetch(&self, id: &UserId) -> Result<User, ApiError>;

   /// 名前・メールアドレスを部分更新し、更新後のユーザーを返す
   async fn update_profile(&self, id: &UserId, input: UpdateProfileInput)
   -> Result<User, ApiError>;

   /// ユーザーを削除する
   async fn delete(&self, id: &UserId) -> Result<(), ApiError>;
}
