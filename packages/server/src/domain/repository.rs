//! Connection registry port.

use async_trait::async_trait;

use super::{ConnectionId, RegistryError, SessionGuard, SessionState};

/// Connection Registry trait
///
/// Owns the [`SessionState`] of every live connection, keyed by
/// [`ConnectionId`]. This is the only shared mutable state of the core.
///
/// Handlers that read and then write a session must do so through
/// [`lock`](SessionRegistry::lock) so that two handlers for the same
/// connection (e.g. `leave` racing `disconnect`) never interleave.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Create an `Unjoined` session for `id`.
    ///
    /// An existing session is left untouched and `AlreadyConnected` is returned.
    async fn connect(&self, id: ConnectionId) -> Result<(), RegistryError>;

    /// Snapshot of the current state, or `None` for an unknown connection
    async fn get(&self, id: &ConnectionId) -> Option<SessionState>;

    /// Replace the state of a registered connection
    async fn set(&self, id: &ConnectionId, state: SessionState) -> Result<(), RegistryError>;

    /// Delete the session. Returns `false` if the connection was unknown.
    ///
    /// Callers holding a [`SessionGuard`] for `id` may call this; pending
    /// `lock` calls for the same id then resolve to `None`.
    async fn remove(&self, id: &ConnectionId) -> bool;

    /// Exclusive access to a registered connection's state
    async fn lock(&self, id: &ConnectionId) -> Option<SessionGuard>;

    /// Snapshot of all sessions
    async fn sessions(&self) -> Vec<(ConnectionId, SessionState)>;

    /// Number of live connections
    async fn count(&self) -> usize;
}
