//! # LoginAPI サーバー
//!
//! ユーザー登録・ログインと、ベアラートークンで保護されたユーザー操作を提供する
//! HTTP API。
//!
//! ## アーキテクチャ
//!
//! ```text
//! handler → usecase → infra (PostgreSQL / Argon2id / JWT)
//!    ↑
//! middleware (アクセスガード)
//! ```
//!
//! ## モジュール構成
//!
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`middleware`] - アクセスガード
//! - [`router`] - ルーターの組み立て
//! - [`usecase`] - アカウント操作のビジネスロジック
//!
//! ## 依存関係
//!
//! - `loginapi_domain`: ドメインモデル、エラー定義
//! - `loginapi_infra`: データベース、パスワードハッシュ、トークン
//! - `loginapi_shared`: レスポンス型、トレーシング
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use loginapi_api::{config::AppConfig, router::{AppState, build_router}};
//!
//! let config = AppConfig::from_env()?;
//! let app = build_router(AppState { usecase, token_codec, subject_policy });
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod router;
pub mod usecase;
