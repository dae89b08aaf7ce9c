//! Chat events: what clients ask for and what the server announces.

use super::{RoomName, Timestamp, Username};

/// Inbound event kinds, after the transport has decoded a frame.
///
/// Payload strings are still raw here; validation happens in the use cases
/// so that an empty field silently drops the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Join {
        username: String,
        room: String,
    },
    Message {
        username: String,
        message: String,
        room: String,
    },
    Leave,
    Disconnect,
}

/// Kind of an outbound [`ChatEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEventKind {
    Join,
    Message,
    Leave,
}

/// Event broadcast to the members of a room.
///
/// The timestamp is always taken from the server clock at emission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub kind: ChatEventKind,
    pub username: Username,
    pub message: String,
    pub room: RoomName,
    pub timestamp: Timestamp,
}

impl ChatEvent {
    pub fn joined(username: Username, room: RoomName, timestamp: Timestamp) -> Self {
        Self {
            kind: ChatEventKind::Join,
            message: format!("{} has joined the room", username),
            username,
            room,
            timestamp,
        }
    }

    pub fn message(
        username: Username,
        message: String,
        room: RoomName,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind: ChatEventKind::Message,
            username,
            message,
            room,
            timestamp,
        }
    }

    pub fn left(username: Username, room: RoomName, timestamp: Timestamp) -> Self {
        Self {
            kind: ChatEventKind::Leave,
            message: format!("{} has left the room", username),
            username,
            room,
            timestamp,
        }
    }
}
