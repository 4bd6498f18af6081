//! Error types for the duplication and folder engine

use serde::Serialize;
use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote platform unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote platform rejected request ({status}): {message}")]
    RemoteRejected { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Folder not empty: {0}")]
    FolderNotEmpty(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Stable machine-readable kind, used in duplication results
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::FolderNotFound(_) => ErrorKind::NotFound,
            Self::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            Self::RemoteRejected { .. } | Self::InvalidResponse(_) | Self::Json(_) => {
                ErrorKind::RemoteRejected
            }
            Self::Validation(_) | Self::Config(_) | Self::Io(_) => ErrorKind::Validation,
            Self::FolderNotEmpty(_) => ErrorKind::FolderNotEmpty,
        }
    }
}

/// Coarse error classification exposed to callers of the core surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    RemoteUnavailable,
    RemoteRejected,
    Validation,
    FolderNotEmpty,
}

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            return Self::RemoteUnavailable(err.to_string());
        }
        if err.is_decode() {
            return Self::InvalidResponse(err.to_string());
        }
        if let Some(status) = err.status() {
            if status.is_server_error() {
                return Self::RemoteUnavailable(err.to_string());
            }
            return Self::RemoteRejected {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        Self::RemoteUnavailable(err.to_string())
    }
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
