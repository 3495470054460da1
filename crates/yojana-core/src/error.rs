//! Error types for the Yojana workspace.

use thiserror::Error;

/// All errors the assistant can produce.
#[derive(Error, Debug)]
pub enum YojanaError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Scheme store error: {0}")]
    Store(String),

    #[error("Chat history error: {0}")]
    History(String),

    #[error("Speech service error: {0}")]
    Speech(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, YojanaError>;
