//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//!
//! ## ロックの構成
//!
//! - 外側の `Mutex<HashMap<..>>`: 接続の追加・削除とスロットの検索のみ
//! - 内側の `Arc<Mutex<SessionState>>`: 接続ごとの read-modify-write
//!
//! 外側のロックを保持したまま内側のロックを待つことはないため、
//! `SessionGuard` を保持したまま `remove` を呼んでもデッドロックしない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RegistryError, SessionGuard, SessionRegistry, SessionState};

type SessionSlot = Arc<Mutex<SessionState>>;

/// インメモリ Session Registry 実装
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: Mutex<HashMap<ConnectionId, SessionSlot>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: &ConnectionId) -> Option<SessionSlot> {
        self.sessions.lock().await.get(id).cloned()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn connect(&self, id: ConnectionId) -> Result<(), RegistryError> {
        let mut sessions = self.sessions.lock().await;
        if sessions.contains_key(&id) {
            return Err(RegistryError::AlreadyConnected(id));
        }
        sessions.insert(id, Arc::new(Mutex::new(SessionState::Unjoined)));
        Ok(())
    }

    async fn get(&self, id: &ConnectionId) -> Option<SessionState> {
        let slot = self.slot(id).await?;
        let state = slot.lock().await;
        Some(state.clone())
    }

    async fn set(&self, id: &ConnectionId, state: SessionState) -> Result<(), RegistryError> {
        let slot = self
            .slot(id)
            .await
            .ok_or_else(|| RegistryError::ConnectionNotFound(id.clone()))?;
        *slot.lock().await = state;
        Ok(())
    }

    async fn remove(&self, id: &ConnectionId) -> bool {
        self.sessions.lock().await.remove(id).is_some()
    }

    async fn lock(&self, id: &ConnectionId) -> Option<SessionGuard> {
        let slot = self.slot(id).await?;
        let guard = SessionGuard::acquire(id.clone(), slot.clone()).await;

        // the session may have been removed (or replaced) while we waited
        let sessions = self.sessions.lock().await;
        match sessions.get(id) {
            Some(current) if Arc::ptr_eq(current, &slot) => Some(guard),
            _ => None,
        }
    }

    async fn sessions(&self) -> Vec<(ConnectionId, SessionState)> {
        let slots: Vec<(ConnectionId, SessionSlot)> = {
            let sessions = self.sessions.lock().await;
            sessions
                .iter()
                .map(|(id, slot)| (id.clone(), slot.clone()))
                .collect()
        };

        let mut snapshot = Vec::with_capacity(slots.len());
        for (id, slot) in slots {
            let state = slot.lock().await.clone();
            snapshot.push((id, state));
        }
        snapshot
    }

    async fn count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
