//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection dropped
    #[error("Connection lost")]
    ConnectionLost,

    /// A frame could not be encoded
    #[error("Failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// Readline could not be initialized
    #[error("Failed to initialize readline: {0}")]
    Readline(String),
}

/// Errors for malformed input lines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: /join <username> <room>")]
    JoinUsage,

    #[error("Unknown command '{0}'. Available: /join <username> <room>, /leave, /quit")]
    Unknown(String),
}
