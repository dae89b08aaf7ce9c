//! Fixtures shared by the use case tests.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use roomcast_shared::time::TickingClock;
use tokio::sync::{Notify, mpsc};

use crate::{
    domain::{
        ChatEvent, ChatEventKind, ConnectionId, MessagePusher, PusherChannel, RoomName,
        SessionRegistry,
    },
    infrastructure::{
        dto::websocket::OutboundFrame, message_pusher::WebSocketMessagePusher,
        registry::InMemorySessionRegistry,
    },
};

pub const START_MILLIS: i64 = 1_700_000_000_000;

/// Registry + pusher + deterministic clock wired together
pub struct Fixture {
    pub registry: Arc<InMemorySessionRegistry>,
    pub message_pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<TickingClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemorySessionRegistry::new()),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            clock: Arc::new(TickingClock::new(START_MILLIS)),
        }
    }

    /// Register a connection in both the registry and the pusher
    pub async fn connect(&self, id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let id = connection(id);
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.connect(id.clone()).await.unwrap();
        self.message_pusher.register_client(id.clone(), tx).await;
        (id, rx)
    }
}

pub fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn room(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}

/// Drain every frame already delivered to `rx`
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<OutboundFrame> {
    let mut frames = Vec::new();
    while let Ok(text) = rx.try_recv() {
        frames.push(serde_json::from_str(&text).unwrap());
    }
    frames
}

/// Pusher whose `leave` broadcasts hang while stalling is switched on.
///
/// Lets a test cancel a handler in the middle of its leave announcement.
pub struct StallingPusher {
    inner: Arc<WebSocketMessagePusher>,
    stall_leaves: AtomicBool,
    stalled: Notify,
    leave_broadcasts: AtomicUsize,
}

impl StallingPusher {
    pub fn new(inner: Arc<WebSocketMessagePusher>) -> Self {
        Self {
            inner,
            stall_leaves: AtomicBool::new(false),
            stalled: Notify::new(),
            leave_broadcasts: AtomicUsize::new(0),
        }
    }

    pub fn stall_leaves(&self, on: bool) {
        self.stall_leaves.store(on, Ordering::SeqCst);
    }

    /// Resolve once a `leave` broadcast is hanging
    pub async fn wait_until_stalled(&self) {
        self.stalled.notified().await;
    }

    /// Number of `leave` broadcasts that were actually delivered
    pub fn leave_broadcasts(&self) -> usize {
        self.leave_broadcasts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagePusher for StallingPusher {
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel) {
        self.inner.register_client(id, sender).await;
    }

    async fn unregister_client(&self, id: &ConnectionId) {
        self.inner.unregister_client(id).await;
    }

    async fn join_room(&self, id: &ConnectionId, room: &RoomName) {
        self.inner.join_room(id, room).await;
    }

    async fn leave_room(&self, id: &ConnectionId, room: &RoomName) {
        self.inner.leave_room(id, room).await;
    }

    async fn broadcast_to_room(&self, room: &RoomName, event: &ChatEvent) -> usize {
        if event.kind != ChatEventKind::Leave {
            return self.inner.broadcast_to_room(room, event).await;
        }
        if self.stall_leaves.load(Ordering::SeqCst) {
            self.stalled.notify_one();
            std::future::pending::<()>().await;
        }
        let delivered = self.inner.broadcast_to_room(room, event).await;
        self.leave_broadcasts.fetch_add(1, Ordering::SeqCst);
        delivered
    }

    async fn room_members(&self, room: &RoomName) -> Vec<ConnectionId> {
        self.inner.room_members(room).await
    }
}
