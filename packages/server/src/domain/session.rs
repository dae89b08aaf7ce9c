//! Per-connection session state.

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{ConnectionId, RoomName, Username};

/// Chat identity of one connection at a point in time.
///
/// ```text
///            join              join (implicit leave of the old room)
/// Unjoined ────────▶ Joined(R) ────────────────────▶ Joined(R')
///    ▲                  │
///    └──────────────────┘
///       leave / disconnect
/// ```
///
/// Username and room are set and cleared together, so a connection is in
/// at most one room at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unjoined,
    Joined { username: Username, room: RoomName },
}

impl SessionState {
    pub fn joined(username: Username, room: RoomName) -> Self {
        Self::Joined { username, room }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Joined { .. })
    }

    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Joined { username, .. } => Some(username),
            Self::Unjoined => None,
        }
    }

    pub fn room(&self) -> Option<&RoomName> {
        match self {
            Self::Joined { room, .. } => Some(room),
            Self::Unjoined => None,
        }
    }
}

/// Exclusive access to one connection's [`SessionState`].
///
/// While a guard is alive no other handler can read-modify-write the same
/// connection, which makes the "leave old room, then join new room" and
/// "announce leave, then remove" sequences atomic per connection. Other
/// connections are not blocked.
pub struct SessionGuard {
    id: ConnectionId,
    state: OwnedMutexGuard<SessionState>,
}

impl SessionGuard {
    pub fn new(id: ConnectionId, state: OwnedMutexGuard<SessionState>) -> Self {
        Self { id, state }
    }

    /// Lock `slot` and wrap the resulting guard
    pub async fn acquire(id: ConnectionId, slot: Arc<Mutex<SessionState>>) -> Self {
        Self::new(id, slot.lock_owned().await)
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Reset the session to [`SessionState::Unjoined`], returning the previous state
    pub fn take(&mut self) -> SessionState {
        std::mem::take(&mut *self.state)
    }
}

impl Deref for SessionGuard {
    type Target = SessionState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice_in_general() -> SessionState {
        SessionState::joined(
            Username::new("alice".to_string()).unwrap(),
            RoomName::new("general".to_string()).unwrap(),
        )
    }

    #[test]
    fn test_default_state_is_unjoined() {
        // テスト項目: 初期状態は Unjoined で、ユーザー名もルームも持たない
        // given (前提条件):
        let state = SessionState::default();

        // when (操作):

        // then (期待する結果):
        assert!(!state.is_joined());
        assert_eq!(state.username(), None);
        assert_eq!(state.room(), None);
    }

    #[test]
    fn test_joined_state_exposes_username_and_room() {
        // テスト項目: Joined 状態からユーザー名とルームを取得できる
        // given (前提条件):
        let state = alice_in_general();

        // when (操作):

        // then (期待する結果):
        assert!(state.is_joined());
        assert_eq!(state.username().map(Username::as_str), Some("alice"));
        assert_eq!(state.room().map(RoomName::as_str), Some("general"));
    }

    #[tokio::test]
    async fn test_guard_take_resets_state() {
        // テスト項目: take() は以前の状態を返し、状態を Unjoined に戻す
        // given (前提条件):
        let slot = Arc::new(Mutex::new(alice_in_general()));
        let id = ConnectionId::new("c1".to_string()).unwrap();
        let mut guard = SessionGuard::acquire(id, slot.clone()).await;

        // when (操作):
        let previous = guard.take();
        drop(guard);

        // then (期待する結果):
        assert_eq!(previous, alice_in_general());
        assert_eq!(*slot.lock().await, SessionState::Unjoined);
    }
}
