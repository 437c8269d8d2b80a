//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `MonitorError`は`error_type()`と`status_code()`メソッドを提供し、
//! APIレスポンス用のエラーオブジェクトを生成できます。

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Delete monitor error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Pool exhausted, closed, or backing store unreachable
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Query failed after a connection was acquired
    #[error("Database error: {0}")]
    Database(String),

    /// Malformed `YYYY-MM-DD` path segment
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Relay queue is full or no longer accepting jobs
    #[error("Relay queue unavailable: {0}")]
    QueueUnavailable(String),

    /// Relay request carries no usable site setting
    #[error("Configuration invalid: {0}")]
    ConfigurationInvalid(String),

    /// External site unreachable or answered with a non-success status
    #[error("Failed to fetch logs from {site}: {detail}")]
    FetchFailed {
        /// Site URL the fetch was issued against
        site: String,
        /// Transport or status detail
        detail: String,
    },

    /// Webhook destination unreachable or answered with a non-success status
    #[error("Failed to deliver notification to {destination}: {detail}")]
    DispatchFailed {
        /// Webhook destination URL
        destination: String,
        /// Transport or status detail
        detail: String,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// Returns a safe error message for external clients.
    ///
    /// Connection strings and query text stay in the server logs; use the
    /// `Display` implementation (`to_string()`) there.
    pub fn external_message(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "Storage temporarily unavailable",
            Self::Database(_) => "Database error",
            Self::InvalidDate(_) => "Invalid date, expected YYYY-MM-DD",
            Self::QueueUnavailable(_) => "Relay queue unavailable",
            Self::ConfigurationInvalid(_) => "Invalid relay configuration",
            Self::FetchFailed { .. } => "Failed to fetch logs",
            Self::DispatchFailed { .. } => "Failed to deliver notification",
            Self::Internal(_) => "Internal server error",
        }
    }

    /// Returns the error type string used in API error objects.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "service_unavailable",
            Self::Database(_) => "server_error",
            Self::InvalidDate(_) => "invalid_request_error",
            Self::QueueUnavailable(_) => "service_unavailable",
            Self::ConfigurationInvalid(_) => "invalid_request_error",
            Self::FetchFailed { .. } => "upstream_error",
            Self::DispatchFailed { .. } => "upstream_error",
            Self::Internal(_) => "server_error",
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Self::QueueUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::ConfigurationInvalid(_) => StatusCode::BAD_REQUEST,
            Self::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::DispatchFailed { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts this error to the JSON error body returned by the API.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.external_message().to_string(),
            error_type: self.error_type().to_string(),
        }
    }
}

impl From<sqlx::Error> for MonitorError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::StorageUnavailable(err.to_string())
            }
            sqlx::Error::Tls(_) | sqlx::Error::Configuration(_) => {
                Self::StorageUnavailable(err.to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

/// APIエラーレスポンス
///
/// ```json
/// { "error": "Storage temporarily unavailable", "type": "service_unavailable" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error type (e.g. "invalid_request_error", "server_error")
    #[serde(rename = "type")]
    pub error_type: String,
}

/// Result type alias
pub type MonitorResult<T> = Result<T, MonitorError>;
