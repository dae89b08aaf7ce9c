//! WebSocket frame DTOs.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<name>", "data": {...}}`. Field names are part of the
//! compatibility surface with existing clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names shared by inbound and outbound frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventName {
    Join,
    Message,
    Leave,
}

/// Frame sent by a client.
///
/// `data` is kept untyped until the event name is known; a missing `data`
/// (as in a bare `{"event":"leave"}`) deserializes to `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundFrame {
    pub event: EventName,
    #[serde(default)]
    pub data: Value,
}

impl InboundFrame {
    pub fn join(username: &str, room: &str) -> Self {
        Self {
            event: EventName::Join,
            data: serde_json::json!({ "username": username, "room": room }),
        }
    }

    pub fn message(username: &str, message: &str, room: &str) -> Self {
        Self {
            event: EventName::Message,
            data: serde_json::json!({ "username": username, "message": message, "room": room }),
        }
    }

    pub fn leave() -> Self {
        Self {
            event: EventName::Leave,
            data: serde_json::json!({}),
        }
    }
}

/// Payload of an inbound `join`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JoinPayload {
    pub username: String,
    pub room: String,
}

/// Payload of an inbound `message`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MessagePayload {
    pub username: String,
    pub message: String,
    pub room: String,
}

/// Frame sent by the server for `join`, `message` and `leave` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundFrame {
    pub event: EventName,
    pub data: ChatPayload,
}

/// Body of every outbound event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    pub username: String,
    pub message: String,
    pub room: String,
    /// Server wall-clock time in Unix milliseconds
    pub timestamp: i64,
}
