//! Domain errors.

use thiserror::Error;

use super::ConnectionId;

/// Raised when a value object is built from an unusable string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("room name must not be empty")]
    EmptyRoomName,
}

/// Errors returned by a [`SessionRegistry`](super::SessionRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// `connect` was called for an id that already has a session
    #[error("connection '{0}' is already registered")]
    AlreadyConnected(ConnectionId),

    /// The id has no session (never connected, or already disconnected)
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(ConnectionId),
}
