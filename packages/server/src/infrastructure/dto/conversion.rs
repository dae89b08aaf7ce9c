//! Conversion logic between DTOs and domain types.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{ChatEvent, ChatEventKind, ClientEvent};
use crate::infrastructure::dto::websocket::{
    ChatPayload, EventName, InboundFrame, JoinPayload, MessagePayload, OutboundFrame,
};

// ========================================
// DTO → Domain
// ========================================

/// Decode a text frame received from a client.
///
/// Missing payload fields become empty strings (and are dropped later by
/// validation); wrongly typed fields or unknown events are decode errors.
pub fn parse_client_event(text: &str) -> Result<ClientEvent, serde_json::Error> {
    let frame: InboundFrame = serde_json::from_str(text)?;
    ClientEvent::try_from(frame)
}

impl TryFrom<InboundFrame> for ClientEvent {
    type Error = serde_json::Error;

    fn try_from(frame: InboundFrame) -> Result<Self, Self::Error> {
        let event = match frame.event {
            EventName::Join => {
                let JoinPayload { username, room } = payload(frame.data)?;
                ClientEvent::Join { username, room }
            }
            EventName::Message => {
                let MessagePayload {
                    username,
                    message,
                    room,
                } = payload(frame.data)?;
                ClientEvent::Message {
                    username,
                    message,
                    room,
                }
            }
            // leave carries no fields; the server uses its own session state
            EventName::Leave => ClientEvent::Leave,
        };
        Ok(event)
    }
}

fn payload<T: DeserializeOwned + Default>(data: Value) -> Result<T, serde_json::Error> {
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data)
}

// ========================================
// Domain → DTO
// ========================================

impl From<ChatEventKind> for EventName {
    fn from(kind: ChatEventKind) -> Self {
        match kind {
            ChatEventKind::Join => EventName::Join,
            ChatEventKind::Message => EventName::Message,
            ChatEventKind::Leave => EventName::Leave,
        }
    }
}

impl From<&ChatEvent> for OutboundFrame {
    fn from(event: &ChatEvent) -> Self {
        Self {
            event: event.kind.into(),
            data: ChatPayload {
                username: event.username.as_str().to_string(),
                message: event.message.clone(),
                room: event.room.as_str().to_string(),
                timestamp: event.timestamp.value(),
            },
        }
    }
}

/// Encode an outbound event as a JSON text frame
pub fn encode_chat_event(event: &ChatEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&OutboundFrame::from(event))
}
