//! Message formatting utilities for client display.

use roomcast_server::infrastructure::dto::websocket::{EventName, OutboundFrame};
use roomcast_shared::time::timestamp_to_local_hhmm;

const UNKNOWN_TIME: &str = "--:--";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a frame received from the server
    pub fn format_frame(frame: &OutboundFrame) -> String {
        let data = &frame.data;
        match frame.event {
            EventName::Join | EventName::Leave => {
                Self::format_system(&data.room, &data.message, data.timestamp)
            }
            EventName::Message => {
                Self::format_chat_message(&data.username, &data.message, data.timestamp)
            }
        }
    }

    /// Format a join/leave notice, e.g. `[12:34] * alice has joined the room (#general)`
    pub fn format_system(room: &str, message: &str, timestamp: i64) -> String {
        format!("\n[{}] * {} (#{})\n", Self::time(timestamp), message, room)
    }

    /// Format a chat line, e.g. `[12:34] alice: hi`
    pub fn format_chat_message(username: &str, message: &str, timestamp: i64) -> String {
        format!("\n[{}] {}: {}\n", Self::time(timestamp), username, message)
    }

    /// Format a raw text frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    fn time(timestamp: i64) -> String {
        timestamp_to_local_hhmm(timestamp).unwrap_or_else(|| UNKNOWN_TIME.to_string())
    }
}
