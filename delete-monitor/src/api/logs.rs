//! 削除ログ閲覧API
//!
//! `GET /logs`, `GET /logs/:date` エンドポイントを提供する。

use super::error::AppError;
use crate::common::error::MonitorError;
use crate::common::types::DeletionLogsResponse;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;

/// パスの日付を`YYYY-MM-DD`として解釈する
pub fn parse_date(raw: &str) -> Result<NaiveDate, MonitorError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| MonitorError::InvalidDate(raw.to_string()))
}

/// GET /logs
pub async fn list_all_logs(
    State(state): State<AppState>,
) -> Result<Json<DeletionLogsResponse>, AppError> {
    let logs = state.deletion_events.list_all().await?;
    Ok(Json(DeletionLogsResponse { logs }))
}

/// GET /logs/:date
pub async fn list_logs_by_date(
    Path(date): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeletionLogsResponse>, AppError> {
    let date = parse_date(&date)?;
    let logs = state.deletion_events.list_by_date(date).await?;
    Ok(Json(DeletionLogsResponse { logs }))
}
