//! # LoginAPI ドメイン層
//!
//! ユーザーアカウントのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、ハッシュ、トークン）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`user`] - ユーザーエンティティと値オブジェクト
//! - [`password`] - パスワード関連の値オブジェクト
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー

pub mod clock;
pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
