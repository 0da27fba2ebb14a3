//! # ウェルカムハンドラ
//!
//! 認証不要の案内メッセージを返す。稼働確認にも使える。
//!
//! ```text
//! $ curl http://localhost:3000/
//! {"msg":"Welcome to login API!"}
//! ```

use axum::Json;
use loginapi_shared::MessageResponse;

/// GET /
pub async fn welcome() -> Json<MessageResponse> {
   Json(MessageResponse::new("Welcome to login API!"))
}
