//! 中継ジョブの非同期ワーカー
//!
//! mpscチャネルでジョブを受信し、ジョブごとに独立したタスクで中継を実行する。
//! 同時実行数はセマフォで制限し、上限に達している間はジョブをチャネルに残す。
//! チャネルも満杯になると投入は`QueueUnavailable`で拒否される。
//! ジョブは永続化しない。中継同士の順序保証・重複排除もない。

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{info, warn};

use crate::common::error::{MonitorError, MonitorResult};
use crate::common::types::RelayRequest;
use crate::config::RelayConfig;
use crate::relay::metrics::RelayMetrics;
use crate::relay::orchestrator::RelayOrchestrator;

/// キューに積まれる中継ジョブ
#[derive(Debug, Clone)]
pub struct RelayJob {
    /// プロセス内で一意なジョブID
    pub id: u64,
    /// 受理日時
    pub accepted_at: DateTime<Utc>,
    /// 中継リクエスト
    pub request: RelayRequest,
}

/// ジョブ投入側ハンドル（Clone可能、senderのクローン）
///
/// すべてのクローンがdropされるとワーカーは残りのジョブを処理して終了する。
#[derive(Clone)]
pub struct RelayQueue {
    sender: mpsc::Sender<RelayJob>,
    next_id: Arc<AtomicU64>,
    metrics: RelayMetrics,
}

impl RelayQueue {
    /// ジョブを投入する（ブロックしない）
    ///
    /// キューが満杯または閉じている場合は`QueueUnavailable`。
    pub fn enqueue(&self, request: RelayRequest) -> MonitorResult<u64> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let job = RelayJob {
            id,
            accepted_at: Utc::now(),
            request,
        };

        self.sender.try_send(job).map_err(|err| {
            self.metrics.record_rejected_job();
            let reason = match err {
                TrySendError::Full(_) => "queue is full",
                TrySendError::Closed(_) => "worker has stopped",
            };
            warn!(job_id = id, "Rejected relay job: {}", reason);
            MonitorError::QueueUnavailable(reason.to_string())
        })?;

        Ok(id)
    }
}

/// バックグラウンドワーカーのハンドル
pub struct RelayWorker {
    handle: JoinHandle<()>,
}

impl RelayWorker {
    /// ワーカーを起動し、投入側ハンドルを返す
    pub fn spawn(
        orchestrator: RelayOrchestrator,
        config: &RelayConfig,
        metrics: RelayMetrics,
    ) -> (RelayQueue, Self) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let permits = Arc::new(Semaphore::new(config.max_concurrent_relays.max(1)));
        let handle = tokio::spawn(Self::background_task(rx, Arc::new(orchestrator), permits));

        let queue = RelayQueue {
            sender: tx,
            next_id: Arc::new(AtomicU64::new(1)),
            metrics,
        };
        (queue, Self { handle })
    }

    /// 実行中の中継が終わるまで待つ
    ///
    /// すべての`RelayQueue`をdropしてから呼ぶこと。
    /// `timeout`内に終わらなければ`false`を返し、残りのタスクは放棄する。
    pub async fn drain(self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(())) => true,
            Ok(Err(err)) => {
                warn!("Relay worker terminated abnormally: {}", err);
                false
            }
            Err(_) => {
                warn!(
                    "Relay worker did not finish within {:?}, abandoning in-flight relays",
                    timeout
                );
                false
            }
        }
    }

    async fn background_task(
        mut rx: mpsc::Receiver<RelayJob>,
        orchestrator: Arc<RelayOrchestrator>,
        permits: Arc<Semaphore>,
    ) {
        let mut in_flight = JoinSet::new();

        loop {
            // 空きができるまでチャネルから受信しない
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };

            let job = loop {
                tokio::select! {
                    job = rx.recv() => break job,
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        log_join_error(joined);
                    }
                }
            };
            let Some(job) = job else {
                break;
            };

            let orchestrator = Arc::clone(&orchestrator);
            in_flight.spawn(async move {
                let _permit = permit;
                Self::run_job(orchestrator, job).await;
            });
        }

        if !in_flight.is_empty() {
            info!("Relay queue closed, waiting for {} in-flight relays", in_flight.len());
        }
        while let Some(joined) = in_flight.join_next().await {
            log_join_error(joined);
        }
        info!("Relay worker stopped");
    }

    async fn run_job(orchestrator: Arc<RelayOrchestrator>, job: RelayJob) {
        let waited_ms = (Utc::now() - job.accepted_at).num_milliseconds();
        // ConfigurationInvalid はオーケストレーター側でログ済み
        if let Ok(report) = orchestrator.run(&job.request).await {
            info!(
                job_id = job.id,
                waited_ms,
                status = ?report.status,
                "Relay job completed"
            );
        } else {
            warn!(job_id = job.id, waited_ms, "Relay job failed");
        }
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(err) = joined {
        warn!("Relay task panicked: {}", err);
    }
}
