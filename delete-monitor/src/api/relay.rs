//! 中継トリガーAPI
//!
//! `POST /send-logs` はジョブをキューに積んで即座に202を返す。
//! 中継の結果はレスポンスに含まれない。

use super::error::AppError;
use crate::common::types::RelayRequest;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::info;

/// 受理レスポンス
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AcceptedResponse {
    /// 常に `accepted`
    pub status: &'static str,
}

/// POST /send-logs
pub async fn trigger_log_sending(
    State(state): State<AppState>,
    Json(request): Json<RelayRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AppError> {
    let channel_id = request.channel_id.clone();
    let job_id = state.relay_queue.enqueue(request)?;
    info!(job_id, channel_id = %channel_id, "Accepted relay trigger");

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse { status: "accepted" }),
    ))
}
