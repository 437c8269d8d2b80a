//! 中継パイプラインのメトリクス
//!
//! 呼び出し元に伝播しない失敗（取得失敗・通知失敗・キュー拒否）を
//! Prometheusカウンタとして公開する。

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

/// Outcome label values for `relay_runs_total`.
pub mod outcome {
    /// Notification delivered with `status: success`
    pub const SUCCESS: &str = "success";
    /// Notification delivered with `status: error`
    pub const ERROR: &str = "error";
    /// Notification could not be delivered
    pub const DISPATCH_FAILED: &str = "dispatch_failed";
    /// Relay request had no site setting
    pub const CONFIGURATION_INVALID: &str = "configuration_invalid";
}

/// 中継メトリクス（Clone可能、内部はArc共有）
#[derive(Clone)]
pub struct RelayMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    runs: IntCounterVec,
    fetch_failures: IntCounter,
    dispatch_failures: IntCounter,
    rejected_jobs: IntCounter,
}

impl RelayMetrics {
    /// 専用レジストリにカウンタを登録して作成
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let runs = IntCounterVec::new(
            Opts::new("relay_runs_total", "Completed relay ticks by outcome"),
            &["outcome"],
        )?;
        let fetch_failures = IntCounter::new(
            "relay_fetch_failures_total",
            "Log fetches that failed and were relayed as an error",
        )?;
        let dispatch_failures = IntCounter::new(
            "relay_dispatch_failures_total",
            "Webhook notifications that could not be delivered",
        )?;
        let rejected_jobs = IntCounter::new(
            "relay_rejected_jobs_total",
            "Relay triggers rejected because the queue was full or closed",
        )?;

        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(fetch_failures.clone()))?;
        registry.register(Box::new(dispatch_failures.clone()))?;
        registry.register(Box::new(rejected_jobs.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                runs,
                fetch_failures,
                dispatch_failures,
                rejected_jobs,
            }),
        })
    }

    /// 中継1回分の結果を記録
    pub fn record_run(&self, outcome: &str) {
        self.inner.runs.with_label_values(&[outcome]).inc();
    }

    /// 取得失敗を記録
    pub fn record_fetch_failure(&self) {
        self.inner.fetch_failures.inc();
    }

    /// 通知失敗を記録
    pub fn record_dispatch_failure(&self) {
        self.inner.dispatch_failures.inc();
    }

    /// キュー投入拒否を記録
    pub fn record_rejected_job(&self) {
        self.inner.rejected_jobs.inc();
    }

    /// 指定outcomeの中継回数
    pub fn runs(&self, outcome: &str) -> u64 {
        self.inner.runs.with_label_values(&[outcome]).get()
    }

    /// 取得失敗回数
    pub fn fetch_failures(&self) -> u64 {
        self.inner.fetch_failures.get()
    }

    /// 通知失敗回数
    pub fn dispatch_failures(&self) -> u64 {
        self.inner.dispatch_failures.get()
    }

    /// キュー投入拒否回数
    pub fn rejected_jobs(&self) -> u64 {
        self.inner.rejected_jobs.get()
    }

    /// Prometheusテキスト形式にエンコード
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.inner.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
