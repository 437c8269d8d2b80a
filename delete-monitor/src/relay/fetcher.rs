//! 外部サイトからの削除ログ取得
//!
//! `GET {site}/{YYYY-MM-DD}` を発行し、`{"logs": [...]}` を読み取る。
//! 失敗は例外ではなくデータとして返す（合成エラーレコード1件）。

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::FetchedLogs;
use crate::relay::metrics::RelayMetrics;

/// 取得元サイトのレスポンスボディ（`logs`の要素の形は問わない）
#[derive(Debug, Deserialize)]
struct SiteLogsBody {
    #[serde(default)]
    logs: Option<Vec<Value>>,
}

/// 日付指定で削除ログを取得するクライアント
#[derive(Clone)]
pub struct LogFetcher {
    client: reqwest::Client,
    timeout: Duration,
    metrics: RelayMetrics,
}

impl LogFetcher {
    /// 新しいフェッチャーを作成
    pub fn new(client: reqwest::Client, timeout: Duration, metrics: RelayMetrics) -> Self {
        Self {
            client,
            timeout,
            metrics,
        }
    }

    /// `{site}/{day}` のURLを組み立てる
    pub fn logs_url(site: &str, day: NaiveDate) -> String {
        format!("{}/{}", site.trim_end_matches('/'), day.format("%Y-%m-%d"))
    }

    /// 指定日のログを取得する
    ///
    /// 通信エラー・非2xx・不正なボディはすべて
    /// `FetchedLogs::Failed("Failed to fetch logs from {site}: {detail}")` になる。
    pub async fn fetch(&self, site: &str, day: NaiveDate) -> FetchedLogs {
        match self.try_fetch(site, day).await {
            Ok(logs) => {
                debug!(site, %day, count = logs.len(), "Fetched deletion logs");
                FetchedLogs::Logs(logs)
            }
            Err(err) => {
                warn!(site, %day, "{}", err);
                self.metrics.record_fetch_failure();
                FetchedLogs::Failed(err.to_string())
            }
        }
    }

    async fn try_fetch(&self, site: &str, day: NaiveDate) -> MonitorResult<Vec<Value>> {
        let failed = |detail: String| MonitorError::FetchFailed {
            site: site.to_string(),
            detail,
        };

        let response = self
            .client
            .get(Self::logs_url(site, day))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| failed(e.to_string()))?;

        let body: SiteLogsBody = response
            .json()
            .await
            .map_err(|e| failed(e.to_string()))?;

        Ok(body.logs.unwrap_or_default())
    }
}
