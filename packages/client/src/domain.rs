//! Domain logic for client-side operations.
//!
//! This module contains pure functions and state that implement client
//! behavior without side effects, making them easy to test.

use crate::error::ClientError;

/// The room this client is currently in, as last requested by the user.
///
/// Kept across reconnects so the client can rejoin automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub username: String,
    pub room: String,
}

impl Membership {
    pub fn new(username: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            room: room.into(),
        }
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Only network failures are worth retrying
    if !matches!(
        error,
        ClientError::ConnectionError(_) | ClientError::ConnectionLost
    ) {
        return false;
    }

    current_attempt < max_attempts
}
