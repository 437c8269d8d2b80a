//! 削除イベントの読み取りストア
//!
//! 外部の監査プロセスが書き込む`file_deletions`テーブルを参照する。
//! 各クエリは接続を1本だけチェックアウトし、すべての経路で返却する。

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::DeletionEvent;
use crate::db::traits::DeletionEventRepository;

const SELECT_ALL: &str = "SELECT id, timestamp, file_path, deleted_by \
     FROM file_deletions ORDER BY timestamp DESC";

const SELECT_BY_DATE: &str = "SELECT id, timestamp, file_path, deleted_by \
     FROM file_deletions WHERE DATE(timestamp) = $1 ORDER BY timestamp DESC";

/// 削除イベントストレージ
#[derive(Clone)]
pub struct DeletionEventStorage {
    pool: PgPool,
}

impl DeletionEventStorage {
    /// 新しいストレージインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, date: Option<NaiveDate>) -> MonitorResult<Vec<DeletionEvent>> {
        // 接続はスコープ終了時（成功・空結果・エラーいずれも）にプールへ戻る
        let mut conn = self.pool.acquire().await.map_err(|e| {
            warn!("Failed to acquire database connection: {}", e);
            MonitorError::StorageUnavailable(format!("Failed to acquire connection: {}", e))
        })?;

        let result = match date {
            Some(date) => {
                sqlx::query_as::<_, DeletionEvent>(SELECT_BY_DATE)
                    .bind(date)
                    .fetch_all(&mut *conn)
                    .await
            }
            None => {
                sqlx::query_as::<_, DeletionEvent>(SELECT_ALL)
                    .fetch_all(&mut *conn)
                    .await
            }
        };

        let events = result.map_err(|e| {
            warn!("Failed to query deletion events: {}", e);
            MonitorError::from(e)
        })?;
        debug!(count = events.len(), ?date, "Loaded deletion events");
        Ok(events)
    }
}

#[async_trait]
impl DeletionEventRepository for DeletionEventStorage {
    async fn list_all(&self) -> MonitorResult<Vec<DeletionEvent>> {
        self.fetch(None).await
    }

    async fn list_by_date(&self, date: NaiveDate) -> MonitorResult<Vec<DeletionEvent>> {
        self.fetch(Some(date)).await
    }
}
