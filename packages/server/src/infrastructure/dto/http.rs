//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Body of the health check endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    pub server: String,
}

impl HealthDto {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            server: "rust".to_string(),
        }
    }
}

/// One active room and the usernames joined to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub room: String,
    pub members: Vec<String>,
}
