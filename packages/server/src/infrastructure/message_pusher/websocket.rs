//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ルームごとの配信グループ（room → 接続の集合）を管理
//! - `ChatEvent` を JSON フレームにエンコードしてルームの全メンバーへ送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、メッセージ送信に使用します。
//! 送信チャネルとルームグループは 1 つの Mutex で守られるため、
//! ブロードキャスト中にメンバー構成が変わることはありません。

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ChatEvent, ConnectionId, MessagePusher, PusherChannel, RoomName},
    infrastructure::dto::conversion::encode_chat_event,
};

#[derive(Default)]
struct PusherState {
    /// Key: connection id, Value: outbound channel
    clients: HashMap<ConnectionId, PusherChannel>,
    /// Key: room name, Value: members of the room's broadcast group
    rooms: HashMap<RoomName, BTreeSet<ConnectionId>>,
}

impl PusherState {
    fn remove_member(&mut self, id: &ConnectionId, room: &RoomName) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(id);
            if members.is_empty() {
                self.rooms.remove(room);
                tracing::debug!("Room '{}' is empty and was dropped", room);
            }
        }
    }
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_client(id.clone(), tx).await;
/// pusher.join_room(&id, &room).await;
/// pusher.broadcast_to_room(&room, &event).await;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", id);
        state.clients.insert(id, sender);
    }

    async fn unregister_client(&self, id: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.clients.remove(id);

        let rooms: Vec<RoomName> = state
            .rooms
            .iter()
            .filter(|(_, members)| members.contains(id))
            .map(|(room, _)| room.clone())
            .collect();
        for room in rooms {
            state.remove_member(id, &room);
        }
        tracing::debug!("Client '{}' unregistered from MessagePusher", id);
    }

    async fn join_room(&self, id: &ConnectionId, room: &RoomName) {
        let mut state = self.state.lock().await;
        state
            .rooms
            .entry(room.clone())
            .or_default()
            .insert(id.clone());
    }

    async fn leave_room(&self, id: &ConnectionId, room: &RoomName) {
        let mut state = self.state.lock().await;
        state.remove_member(id, room);
    }

    async fn broadcast_to_room(&self, room: &RoomName, event: &ChatEvent) -> usize {
        let frame = match encode_chat_event(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Failed to encode event for room '{}': {}", room, e);
                return 0;
            }
        };

        let state = self.state.lock().await;
        let Some(members) = state.rooms.get(room) else {
            tracing::debug!("Room '{}' has no members, nothing to broadcast", room);
            return 0;
        };

        let mut delivered = 0;
        for member in members {
            match state.clients.get(member) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => match sender.send(frame.clone()) {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::warn!("Failed to push event to client '{}': {}", member, e);
                    }
                },
                None => {
                    tracing::warn!(
                        "Client '{}' not found during broadcast, skipping",
                        member
                    );
                }
            }
        }
        tracing::debug!(
            "Broadcasted {:?} event to {}/{} members of '{}'",
            event.kind,
            delivered,
            members.len(),
            room
        );
        delivered
    }

    async fn room_members(&self, room: &RoomName) -> Vec<ConnectionId> {
        let state = self.state.lock().await;
        state
            .rooms
            .get(room)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }
}
