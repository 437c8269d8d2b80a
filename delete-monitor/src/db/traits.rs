//! Repository traitパターン定義
//!
//! DB操作を抽象化し、APIハンドラーをDBなしでテストできるようにする。

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::common::error::MonitorResult;
use crate::common::types::DeletionEvent;

/// 削除イベント読み取りのRepository trait
#[async_trait]
pub trait DeletionEventRepository: Send + Sync {
    /// すべての削除イベントを新しい順に取得
    async fn list_all(&self) -> MonitorResult<Vec<DeletionEvent>>;
    /// 指定日の削除イベントを新しい順に取得
    async fn list_by_date(&self, date: NaiveDate) -> MonitorResult<Vec<DeletionEvent>>;
}
