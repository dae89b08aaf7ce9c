//! Room-based WebSocket chat server.
//!
//! Clients join a named room and exchange messages broadcast to every
//! member of that room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 127.0.0.1 --port 3000
//! PORT=4000 CORS_ORIGIN=http://localhost:3000 cargo run --bin roomcast-server
//! ```

use std::sync::Arc;

use clap::Parser;
use roomcast_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry},
    ui::Server,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, EventDispatcher, GetRoomsUseCase,
        JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase,
    },
};
use roomcast_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Room-based WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Allowed CORS origin ("*" allows any origin)
    #[arg(long, env = "CORS_ORIGIN", default_value = "*")]
    cors_origin: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        cors_origin: args.cors_origin,
    };

    // Initialize dependencies in order:
    // 1. Registry and MessagePusher
    // 2. UseCases
    // 3. Server

    // 1. Create Registry (in-memory) and MessagePusher (WebSocket implementation)
    let registry = Arc::new(InMemorySessionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let clock = Arc::new(SystemClock);

    // 2. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let dispatcher = Arc::new(EventDispatcher::new(
        Arc::new(JoinRoomUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        Arc::new(SendMessageUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        Arc::new(LeaveRoomUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
        Arc::new(DisconnectSessionUseCase::new(
            registry.clone(),
            message_pusher.clone(),
            clock.clone(),
        )),
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry.clone()));

    // 3. Create and run the server
    let server = Server::new(config, connect_session_usecase, dispatcher, get_rooms_usecase);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
