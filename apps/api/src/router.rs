//! # ルーター
//!
//! エンドポイントとミドルウェアを組み立てる。
//!
//! | メソッド | パス | 認証 |
//! |---------|------|------|
//! | GET | `/` | 不要 |
//! | POST | `/auth/register` | 不要 |
//! | POST | `/auth/login` | 不要 |
//! | GET / PUT / DELETE | `/user/{id}` | ベアラートークン |

use std::sync::Arc;

use axum::{
   Router,
   middleware::from_fn_with_state,
   routing::{get, post},
};
use loginapi_infra::TokenCodec;
use loginapi_shared::observability::make_request_span;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
   handler::{AccountState, delete_user, get_user, login, register, update_user, welcome},
   middleware::{AccessGuardState, SubjectPolicy, require_bearer},
   usecase::AccountUseCase,
};

/// アプリケーション全体の状態
///
/// `main` で一度だけ構築し、[`build_router`] に渡す。
pub struct AppState {
   pub usecase:        Arc<dyn AccountUseCase>,
   pub token_codec:    Arc<dyn TokenCodec>,
   pub subject_policy: SubjectPolicy,
}

/// ルーターを構築する
///
/// `/user/{id}` はアクセスガードを通過したリクエストのみハンドラに届く。
pub fn build_router(state: AppState) -> Router {
   let guard = AccessGuardState {
      token_codec: state.token_codec,
   };
   let account_state = Arc::new(AccountState {
      usecase:        state.usecase,
      subject_policy: state.subject_policy,
   });

   let protected = Router::new()
      .route(
         "/user/{id}",
         get(get_user).put(update_user).delete(delete_user),
      )
      .route_layer(from_fn_with_state(guard, require_bearer));

   Router::new()
      .route("/", get(welcome))
      .route("/auth/register", post(register))
      .route("/auth/login", post(login))
      .merge(protected)
      .with_state(account_state)
      .layer(CorsLayer::permissive())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
