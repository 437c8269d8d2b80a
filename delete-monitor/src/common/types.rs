//! ドメイン型定義
//!
//! 削除イベント、中継リクエスト、通知ペイロード

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label prefix identifying the setting that carries the site URL.
pub const SITE_SETTING_PREFIX: &str = "site";

/// 削除イベント（外部の監査プロセスが`file_deletions`へ書き込む）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeletionEvent {
    /// イベントID
    pub id: i32,
    /// 削除日時
    pub timestamp: NaiveDateTime,
    /// 削除されたファイルのパス
    pub file_path: String,
    /// 削除したユーザー
    pub deleted_by: String,
}

/// 削除イベント一覧レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionLogsResponse {
    /// 新しい順の削除イベント
    pub logs: Vec<DeletionEvent>,
}

/// 中継トリガーの呼び出し元が渡す設定項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySetting {
    /// 設定ラベル（`site`で始まるものが取得元URL）
    pub label: String,
    /// 設定の型名
    #[serde(rename = "type")]
    pub setting_type: String,
    /// 必須フラグ
    pub required: bool,
    /// 既定値
    pub default: String,
}

/// `POST /send-logs` のリクエストボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayRequest {
    /// 通知チャネルID
    pub channel_id: String,
    /// 通知の送信先URL
    pub return_url: String,
    /// 設定項目（順序を保持）
    pub settings: Vec<RelaySetting>,
}

impl RelayRequest {
    /// Returns the `default` of the first setting whose label starts with `site`.
    pub fn site_url(&self) -> Option<&str> {
        self.settings
            .iter()
            .find(|setting| setting.label.starts_with(SITE_SETTING_PREFIX))
            .map(|setting| setting.default.as_str())
    }
}

/// 取得元サイトからの取得結果
///
/// サイトが返したレコードは形を問わずそのまま保持する。取得失敗はレコードとは
/// 別に持ち、サイトのデータと混ざらないようにする。
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedLogs {
    /// レスポンスの`logs`フィールド（欠落時は空）
    Logs(Vec<Value>),
    /// 取得失敗（`Failed to fetch logs from {site}: {detail}`）
    Failed(String),
}

impl FetchedLogs {
    /// Number of records the site returned; zero for a failed fetch.
    pub fn record_count(&self) -> usize {
        match self {
            Self::Logs(logs) => logs.len(),
            Self::Failed(_) => 0,
        }
    }

    /// Returns the failure text if the fetch failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Logs(_) => None,
            Self::Failed(message) => Some(message),
        }
    }
}

/// 通知ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// ログを1件以上取得できた
    Success,
    /// ログが空、または取得に失敗した
    Error,
}

impl NotificationStatus {
    /// `Success` iff the fetch succeeded with at least one record.
    pub fn from_fetched(fetched: &FetchedLogs) -> Self {
        match fetched {
            FetchedLogs::Logs(logs) if !logs.is_empty() => Self::Success,
            _ => Self::Error,
        }
    }
}

/// Webhook送信先へ届ける通知ペイロード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// 本文
    pub message: String,
    /// イベント名
    pub event_name: String,
    /// ステータス
    pub status: NotificationStatus,
    /// 送信者名
    pub username: String,
}
