//! データベースアクセス層
//!
//! PostgreSQLの`file_deletions`テーブルを読み取り専用で参照する

/// 削除イベントの読み取りストア
pub mod deletion_events;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;

use crate::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// プール内で維持する最小接続数
pub const MIN_CONNECTIONS: u32 = 1;

/// 同時接続数の上限（バックエンドへのファンアウトを制限する）
pub const MAX_CONNECTIONS: u32 = 5;

/// 接続プールを作成する
///
/// 接続は最初のチェックアウト時に確立する。DBに到達できない場合でも起動は成功し、
/// 各クエリが`acquire_timeout`後に`StorageUnavailable`を返す。
pub fn create_pool(config: &DatabaseConfig) -> PgPool {
    info!(
        "Creating database pool for {}@{}:{}/{} (max {} connections)",
        config.user, config.host, config.port, config.name, MAX_CONNECTIONS
    );
    PgPoolOptions::new()
        .min_connections(MIN_CONNECTIONS)
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}

/// 接続プールを閉じ、チェックアウト中の接続が返却されるまで待つ
pub async fn close_pool(pool: &PgPool) {
    info!("Closing database pool ({} open connections)", pool.size());
    pool.close().await;
    info!("Database pool closed");
}
