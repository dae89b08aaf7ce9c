//! Terminal chat client for the room chat server.
//!
//! Reads lines from stdin: `/join <username> <room>` enters a room, `/leave`
//! leaves it, `/quit` exits, and anything else is sent to the current room.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval) and rejoins the last room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client
//! cargo run --bin roomcast-client -- --username alice --room general
//! ```

use clap::Parser;

use roomcast_client::{domain::Membership, run_client};
use roomcast_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "roomcast-client")]
#[command(about = "Terminal client for the room-based chat server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:4000/ws")]
    url: String,

    /// Username to join with on startup
    #[arg(short = 'n', long, requires = "room")]
    username: Option<String>,

    /// Room to join on startup
    #[arg(short = 'r', long, requires = "username")]
    room: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let initial = match (args.username, args.room) {
        (Some(username), Some(room)) => Some(Membership::new(username, room)),
        _ => None,
    };

    // Run the client
    if let Err(e) = run_client(args.url, initial).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
