//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs          # 親モジュール（re-export）
//! └── handler/
//!     ├── welcome.rs  # 公開の案内メッセージ
//!     ├── account.rs  # 登録・ログイン（認証不要）
//!     └── user.rs     # 取得・更新・削除（ベアラートークン必須）
//! ```

pub mod account;
pub mod user;
pub mod welcome;

pub use account::{AccountState, login, register};
pub use user::{delete_user, get_user, update_user};
pub use welcome::welcome;
