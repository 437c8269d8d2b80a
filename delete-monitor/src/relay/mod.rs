//! 削除ログ中継パイプライン
//!
//! `POST /send-logs` で受理したリクエストをワーカーへ渡し、
//! 外部サイトからログを取得してWebhookへ通知する。

/// Webhook通知
pub mod dispatcher;

/// 外部サイトからのログ取得
pub mod fetcher;

/// 中継メトリクス
pub mod metrics;

/// 取得 → 通知のオーケストレーション
pub mod orchestrator;

/// ジョブキューとバックグラウンドワーカー
pub mod worker;
