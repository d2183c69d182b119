//! Error types for Hitlist startup and wiring

use thiserror::Error;

/// General Hitlist error type
#[derive(Debug, Error)]
pub enum HitlistError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HitlistError>;
