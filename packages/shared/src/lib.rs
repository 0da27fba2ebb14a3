//! # LoginAPI 共有ユーティリティ
//!
//! ビジネスロジックを含まない共通部品を提供する。
//!
//! - [`error_response`] - エラーレスポンスの JSON ボディ
//! - [`api_response`] - メッセージのみの成功レスポンス
//! - [`correlation_id`] - リクエスト追跡用 ID
//! - [`observability`] - トレーシング初期化とリクエストスパン

pub mod api_response;
pub mod correlation_id;
pub mod error_response;
pub mod observability;

pub use api_response::MessageResponse;
pub use correlation_id::CorrelationId;
pub use error_response::ErrorResponse;
