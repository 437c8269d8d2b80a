//! Webhookへの通知送信
//!
//! 取得したログを`NotificationPayload`に変換し、返却URLへPOSTする。
//! 失敗はログとメトリクスに記録するだけで呼び出し元には伝播しない。再送もしない。

use reqwest::StatusCode;
use std::time::Duration;
use tracing::{info, warn};

use crate::common::error::MonitorError;
use crate::common::types::{FetchedLogs, NotificationPayload, NotificationStatus};
use crate::relay::metrics::RelayMetrics;

/// 通知のイベント名
pub const EVENT_NAME: &str = "❌ DELETE LOGS";

/// 通知の送信者名
pub const USERNAME: &str = "DELETE LOGGER";

/// ログが空のときの本文
pub const EMPTY_MESSAGE: &str = "No deletion logs found";

/// 送信結果（観測用。呼び出し元がエラー処理する必要はない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// 2xx/3xxで受理された
    Delivered(NotificationStatus),
    /// 通信エラーまたは非成功ステータス
    Failed,
}

/// 取得結果から本文を組み立てる
///
/// 取得失敗ならそのエラー文、空なら固定文、それ以外はJSON配列。
pub fn render_message(fetched: &FetchedLogs) -> String {
    match fetched {
        FetchedLogs::Failed(error) => error.clone(),
        FetchedLogs::Logs(logs) if logs.is_empty() => EMPTY_MESSAGE.to_string(),
        FetchedLogs::Logs(logs) => serde_json::to_string(logs)
            .unwrap_or_else(|e| format!("{} deletion logs (unserializable: {})", logs.len(), e)),
    }
}

/// 取得結果から通知ペイロードを組み立てる
pub fn build_payload(fetched: &FetchedLogs) -> NotificationPayload {
    NotificationPayload {
        message: render_message(fetched),
        event_name: EVENT_NAME.to_string(),
        status: NotificationStatus::from_fetched(fetched),
        username: USERNAME.to_string(),
    }
}

/// Webhook送信クライアント
#[derive(Clone)]
pub struct WebhookDispatcher {
    client: reqwest::Client,
    timeout: Duration,
    metrics: RelayMetrics,
}

impl WebhookDispatcher {
    /// 新しいディスパッチャーを作成
    ///
    /// `client`はリダイレクトを追跡しない設定にしておくこと（3xxも成功扱い）。
    pub fn new(client: reqwest::Client, timeout: Duration, metrics: RelayMetrics) -> Self {
        Self {
            client,
            timeout,
            metrics,
        }
    }

    /// 通知を送信する（ベストエフォート）
    pub async fn send(&self, fetched: &FetchedLogs, destination_url: &str) -> DispatchOutcome {
        let payload = build_payload(fetched);
        match self.post(&payload, destination_url).await {
            Ok(()) => {
                info!(
                    destination = destination_url,
                    status = ?payload.status,
                    "Delivered deletion log notification"
                );
                DispatchOutcome::Delivered(payload.status)
            }
            Err(err) => {
                self.metrics.record_dispatch_failure();
                warn!(destination = destination_url, "{}", err);
                DispatchOutcome::Failed
            }
        }
    }

    async fn post(
        &self,
        payload: &NotificationPayload,
        destination_url: &str,
    ) -> Result<(), MonitorError> {
        let failed = |detail: String| MonitorError::DispatchFailed {
            destination: destination_url.to_string(),
            detail,
        };

        let response = self
            .client
            .post(destination_url)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if is_accepted(status) {
            Ok(())
        } else {
            Err(failed(format!("unexpected status {}", status)))
        }
    }
}

fn is_accepted(status: StatusCode) -> bool {
    status.is_success() || status.is_redirection()
}
