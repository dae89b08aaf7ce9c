//! HTTP / WebSocket transport adapter.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, build_router};
