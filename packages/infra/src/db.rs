//! # PostgreSQL 接続
//!
//! 起動時にプールを一つ作り、`users` テーブルのマイグレーションを適用する。
//!
//! ```rust,ignore
//! let pool = loginapi_infra::db::create_pool(&database_url).await?;
//! loginapi_infra::db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// プールの最大接続数
const MAX_CONNECTIONS: u32 = 10;

/// 接続取得を諦めるまでの時間
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// `migrations/` 配下の未適用マイグレーションを適用する
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
   sqlx::migrate!("../../migrations").run(pool).await
}

/// 接続プールを作成する
///
/// 接続先に到達できない場合はここでエラーになる。
#[tracing::instrument(skip_all, level = "debug")]
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
   PgPoolOptions::new()
      .max_connections(MAX_CONNECTIONS)
      .acquire_timeout(ACQUIRE_TIMEOUT)
      .connect(database_url)
      .await
}
