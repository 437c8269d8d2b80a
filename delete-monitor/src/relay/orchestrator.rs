//! 中継オーケストレーター
//!
//! 1回の中継（relay tick）を `Triggered → Fetching → Dispatching → Done` の順に実行する。
//! 途中状態は永続化しない。プロセスが途中で終了した場合、その回の中継は失われる。

use chrono::{Local, NaiveDate};
use std::fmt;
use tracing::{debug, error, info};

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::{NotificationStatus, RelayRequest, SITE_SETTING_PREFIX};
use crate::config::RelayConfig;
use crate::relay::dispatcher::{DispatchOutcome, WebhookDispatcher};
use crate::relay::fetcher::LogFetcher;
use crate::relay::metrics::{outcome, RelayMetrics};

/// 中継の段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStage {
    /// 受理済み
    Triggered,
    /// ログ取得中
    Fetching,
    /// 通知送信中
    Dispatching,
    /// 完了
    Done,
}

impl fmt::Display for RelayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Triggered => "triggered",
            Self::Fetching => "fetching",
            Self::Dispatching => "dispatching",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// 1回の中継結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    /// 取得元サイトURL
    pub site: String,
    /// 取得対象日
    pub day: NaiveDate,
    /// サイトが返したレコード数（取得失敗時は0）
    pub record_count: usize,
    /// 通知ステータス
    pub status: NotificationStatus,
    /// 送信結果
    pub dispatch: DispatchOutcome,
}

/// 取得 → 通知を結ぶオーケストレーター
#[derive(Clone)]
pub struct RelayOrchestrator {
    fetcher: LogFetcher,
    dispatcher: WebhookDispatcher,
    metrics: RelayMetrics,
}

/// 中継リクエストから取得元URLを選択する
///
/// ラベルが`site`で始まる最初の設定を使う。該当なしは`ConfigurationInvalid`。
pub fn select_site_url(request: &RelayRequest) -> MonitorResult<&str> {
    request.site_url().ok_or_else(|| {
        MonitorError::ConfigurationInvalid(format!(
            "no setting with a label starting with '{}' among {} settings for channel {}",
            SITE_SETTING_PREFIX,
            request.settings.len(),
            request.channel_id
        ))
    })
}

impl RelayOrchestrator {
    /// 取得・通知で共有するHTTPクライアントを構築して作成
    pub fn new(config: &RelayConfig, metrics: RelayMetrics) -> MonitorResult<Self> {
        // 3xxを成功として扱うため、リダイレクトは追跡しない
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| MonitorError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_components(
            LogFetcher::new(client.clone(), config.fetch_timeout, metrics.clone()),
            WebhookDispatcher::new(client, config.dispatch_timeout, metrics.clone()),
            metrics,
        ))
    }

    /// 構築済みのフェッチャー・ディスパッチャーから作成
    pub fn with_components(
        fetcher: LogFetcher,
        dispatcher: WebhookDispatcher,
        metrics: RelayMetrics,
    ) -> Self {
        Self {
            fetcher,
            dispatcher,
            metrics,
        }
    }

    /// 当日（ローカル日付）分の中継を実行
    pub async fn run(&self, request: &RelayRequest) -> MonitorResult<RelayReport> {
        self.run_for_day(request, Local::now().date_naive()).await
    }

    /// 指定日の中継を実行
    pub async fn run_for_day(
        &self,
        request: &RelayRequest,
        day: NaiveDate,
    ) -> MonitorResult<RelayReport> {
        debug!(channel_id = %request.channel_id, stage = %RelayStage::Triggered, "Relay started");

        let site = match select_site_url(request) {
            Ok(site) => site,
            Err(err) => {
                error!(channel_id = %request.channel_id, "Relay aborted: {}", err);
                self.metrics.record_run(outcome::CONFIGURATION_INVALID);
                return Err(err);
            }
        };

        debug!(channel_id = %request.channel_id, stage = %RelayStage::Fetching, site, %day);
        let fetched = self.fetcher.fetch(site, day).await;
        let record_count = fetched.record_count();

        debug!(
            channel_id = %request.channel_id,
            stage = %RelayStage::Dispatching,
            records = record_count,
            fetch_failed = fetched.failure().is_some(),
            destination = %request.return_url
        );
        let dispatch = self.dispatcher.send(&fetched, &request.return_url).await;

        let status = NotificationStatus::from_fetched(&fetched);
        self.metrics.record_run(match dispatch {
            DispatchOutcome::Delivered(NotificationStatus::Success) => outcome::SUCCESS,
            DispatchOutcome::Delivered(NotificationStatus::Error) => outcome::ERROR,
            DispatchOutcome::Failed => outcome::DISPATCH_FAILED,
        });

        info!(
            channel_id = %request.channel_id,
            stage = %RelayStage::Done,
            site,
            %day,
            records = record_count,
            ?status,
            ?dispatch,
            "Relay finished"
        );

        Ok(RelayReport {
            site: site.to_string(),
            day,
            record_count,
            status,
            dispatch,
        })
    }
}
