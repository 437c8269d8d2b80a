//! ロギング初期化ユーティリティ
//!
//! `tracing-subscriber` を環境変数から構成する。

use crate::config::get_env_with_fallback;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 人間向けテキスト
    Text,
    /// 1行1JSON
    Json,
}

impl LogFormat {
    /// `DELETE_MONITOR_LOG_FORMAT` から出力形式を決定する（未設定・不明値はText）
    pub fn from_env() -> Self {
        match std::env::var("DELETE_MONITOR_LOG_FORMAT")
            .map(|value| value.to_ascii_lowercase())
            .as_deref()
        {
            Ok("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// ログレベルフィルタ文字列を取得
///
/// `DELETE_MONITOR_LOG_LEVEL`（旧: `RUST_LOG`）、未設定なら `info`。
pub fn filter_directive() -> String {
    get_env_with_fallback("DELETE_MONITOR_LOG_LEVEL", "RUST_LOG")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// グローバルsubscriberを初期化する
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(false)
        .with_file(false);

    let format = LogFormat::from_env();
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("Failed to install {:?} log subscriber", format))
}
