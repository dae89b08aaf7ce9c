//! Single typed entry point for inbound client events.

use std::sync::Arc;

use crate::domain::{ChatEvent, ClientEvent, ConnectionId};

use super::{DisconnectSessionUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase};

/// Routes a decoded [`ClientEvent`] to its use case.
///
/// This is where the core degrades to no-ops: validation failures and
/// events for unknown connections are logged at debug level and dropped,
/// never surfaced to the sender.
pub struct EventDispatcher {
    join_room_usecase: Arc<JoinRoomUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
}

impl EventDispatcher {
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            send_message_usecase,
            leave_room_usecase,
            disconnect_session_usecase,
        }
    }

    /// Handle one event for `id`, returning the events that were broadcast
    /// in emission order.
    pub async fn handle(&self, id: &ConnectionId, event: ClientEvent) -> Vec<ChatEvent> {
        match event {
            ClientEvent::Join { username, room } => {
                match self.join_room_usecase.execute(id, username, room).await {
                    Ok(outcome) => outcome.into_events(),
                    Err(e) => {
                        tracing::debug!("Dropped join from '{}': {}", id, e);
                        Vec::new()
                    }
                }
            }
            ClientEvent::Message {
                username,
                message,
                room,
            } => match self
                .send_message_usecase
                .execute(id, username, message, room)
                .await
            {
                Ok(event) => vec![event],
                Err(e) => {
                    tracing::debug!("Dropped message from '{}': {}", id, e);
                    Vec::new()
                }
            },
            ClientEvent::Leave => match self.leave_room_usecase.execute(id).await {
                Ok(left) => left.into_iter().collect(),
                Err(e) => {
                    tracing::debug!("Dropped leave from '{}': {}", id, e);
                    Vec::new()
                }
            },
            ClientEvent::Disconnect => match self.disconnect_session_usecase.execute(id).await {
                Ok(left) => left.into_iter().collect(),
                Err(e) => {
                    tracing::debug!("Disconnect for '{}' was a no-op: {}", id, e);
                    Vec::new()
                }
            },
        }
    }
}
