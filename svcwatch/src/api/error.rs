//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::{CommonError, MonitorError};
use crate::common::protocol::ErrorResponse;
use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::error;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub MonitorError);

impl From<MonitorError> for AppError {
    fn from(err: MonitorError) -> Self {
        AppError(err)
    }
}

impl AppError {
    /// エラーに対応するHTTPステータス
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MonitorError::Common(CommonError::Validation(_)) => StatusCode::BAD_REQUEST,
            MonitorError::Common(CommonError::Config(_)) => StatusCode::BAD_REQUEST,
            MonitorError::Common(CommonError::Serialization(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            MonitorError::ServiceNotFound(_)
            | MonitorError::EndpointNotFound(_)
            | MonitorError::NotFound(_) => StatusCode::NOT_FOUND,
            MonitorError::CorruptStore(_) | MonitorError::Storage(_) | MonitorError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        // 外部にはexternal_message()のみ返し、詳細はログに残す
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let payload = ErrorResponse {
            error: self.0.external_message(),
        };

        (status, Json(payload)).into_response()
    }
}
