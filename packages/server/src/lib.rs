//! Room-based chat relay server.
//!
//! Clients connect over WebSocket, join a named room, exchange messages
//! broadcast to every member of that room and leave or disconnect, with
//! the server announcing membership changes. A connection is a member of
//! at most one room at a time.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
