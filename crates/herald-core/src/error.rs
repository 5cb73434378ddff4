use thiserror::Error;

/// Top-level error type for Herald.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Error from the social feed API.
    #[error("feed error: {0}")]
    Feed(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Store/database error.
    #[error("store error: {0}")]
    Store(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
