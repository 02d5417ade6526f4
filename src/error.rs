//! Error types for payload construction

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("unknown severity code: {0}")]
    UnknownSeverity(u8),

    #[error("no team configured for application id {0}")]
    UnknownApplication(u64),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PayloadError>;
