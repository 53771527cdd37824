//! Unified error handling for the client.

use thiserror::Error;

/// All possible errors from client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the auth token (invalid or expired)
    #[error("authentication rejected")]
    Auth,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("engine error: {0}")]
    Engine(#[from] pictrail_engine::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
