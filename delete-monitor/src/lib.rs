//! Delete Monitor Server
//!
//! ファイル削除イベントを通知チャネルへ中継し、削除履歴をAPIで提供するサーバー

#![warn(missing_docs)]

/// 共通型定義・エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// 削除ログの中継パイプライン（取得 → 通知）
pub mod relay;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// CLIインターフェース
pub mod cli;

/// axumサーバー起動・シャットダウン
pub mod server;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 削除イベントの読み取りストア
    pub deletion_events: Arc<dyn db::traits::DeletionEventRepository>,
    /// 中継ジョブのキュー
    pub relay_queue: relay::worker::RelayQueue,
    /// 中継メトリクス
    pub relay_metrics: relay::metrics::RelayMetrics,
}
