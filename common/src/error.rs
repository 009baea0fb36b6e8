//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;
use uuid::Uuid;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// svcwatch error type
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Service not found
    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    /// Endpoint (URL) not found in the given service
    #[error("URL not found: {0}")]
    EndpointNotFound(Uuid),

    /// Resource not found (unparseable ids etc.)
    #[error("{0}")]
    NotFound(String),

    /// Persisted document exists but cannot be parsed
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    /// Persistence I/O error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    /// バリデーションエラーを作成
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Common(CommonError::Validation(message.into()))
    }

    /// 404として扱うエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ServiceNotFound(_) | Self::EndpointNotFound(_) | Self::NotFound(_)
        )
    }

    /// Returns a safe error message for external clients.
    ///
    /// Validation and not-found messages are meant for the caller. Storage
    /// details (file paths, OS errors) stay in the server logs.
    pub fn external_message(&self) -> String {
        match self {
            Self::Common(CommonError::Validation(message)) => message.clone(),
            Self::Common(_) => "Request error".to_string(),
            Self::ServiceNotFound(_) => "Service not found".to_string(),
            Self::EndpointNotFound(_) => "URL not found".to_string(),
            Self::NotFound(message) => message.clone(),
            Self::CorruptStore(_) => "Service storage is corrupted".to_string(),
            Self::Storage(_) => "Storage error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

/// svcwatch Result type
pub type MonitorResult<T> = Result<T, MonitorError>;
