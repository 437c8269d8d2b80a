//! Prometheusメトリクスエクスポート

use super::error::AppError;
use crate::common::error::MonitorError;
use crate::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

/// GET /metrics
pub async fn export_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state
        .relay_metrics
        .encode()
        .map_err(|e| MonitorError::Internal(format!("Failed to encode metrics: {}", e)))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}
