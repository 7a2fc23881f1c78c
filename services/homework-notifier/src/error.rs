//! Error types for the homework notifier

/// Errors that can occur while polling reviews and notifying
#[derive(Debug, thiserror::Error)]
pub enum NotifierError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Review API request failed: {0}")]
    Transport(String),

    #[error("Unexpected response format: {0}")]
    Schema(String),

    #[error("Unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("Bot API error: {0}")]
    Notifier(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for notifier operations
pub type Result<T> = std::result::Result<T, NotifierError>;
