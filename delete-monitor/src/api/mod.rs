//! REST APIハンドラー
//!
//! 削除ログ閲覧、中継トリガー、メトリクス

/// エラーレスポンス
pub mod error;
/// 削除ログ閲覧
pub mod logs;
/// メトリクス
pub mod metrics;
/// 中継トリガー
pub mod relay;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/logs", get(logs::list_all_logs))
        .route("/logs/:date", get(logs::list_logs_by_date))
        .route("/send-logs", post(relay::trigger_log_sending))
        .route("/metrics", get(metrics::export_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
