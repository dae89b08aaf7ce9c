//! Room broadcast port.
//!
//! The transport adapter implements this trait: it owns the outbound
//! channel of every connection and the transport-level room groups used
//! to compute fan-out targets.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatEvent, ConnectionId, RoomName};

/// Outbound channel of one connection (already-encoded frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Start delivering frames for `id` through `sender`
    async fn register_client(&self, id: ConnectionId, sender: PusherChannel);

    /// Forget the channel of `id` and drop it from every room group
    async fn unregister_client(&self, id: &ConnectionId);

    /// Add `id` to the broadcast group of `room`
    async fn join_room(&self, id: &ConnectionId, room: &RoomName);

    /// Remove `id` from the broadcast group of `room`
    async fn leave_room(&self, id: &ConnectionId, room: &RoomName);

    /// Deliver `event` to every connection currently in `room`.
    ///
    /// Fire-and-forget: a failing recipient is skipped and never affects
    /// the sender. Returns the number of connections the event was handed to.
    async fn broadcast_to_room(&self, room: &RoomName, event: &ChatEvent) -> usize;

    /// Connections currently in the broadcast group of `room`
    async fn room_members(&self, room: &RoomName) -> Vec<ConnectionId>;
}
