use thiserror::Error;

/// Error types for the TON batch sender
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Invalid send mode: {0}")]
    InvalidSendMode(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Batch too large: {count} messages (max: {max})")]
    BatchTooLarge { count: usize, max: usize },

    #[error("Chain unavailable: {0}")]
    ChainUnavailable(String),

    #[error("Not enough balance: required {required} nanotons, available {available} nanotons")]
    InsufficientBalance { required: u64, available: u64 },

    #[error("Comment encoding failed: {0}")]
    CommentEncodingFailed(String),

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    #[error("Submission timed out after {0} seconds, transaction may still be included")]
    SubmissionTimeout(u64),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for batch sender operations
pub type Result<T> = std::result::Result<T, Error>;
