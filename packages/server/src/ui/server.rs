//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    usecase::{ConnectSessionUseCase, EventDispatcher, GetRoomsUseCase},
};

use super::{
    handler::{get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router
///
/// * `GET /` - health check
/// * `GET /api/rooms` - active rooms and their members
/// * `GET /ws` - WebSocket endpoint
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Room chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     config,
///     connect_session_usecase,
///     dispatcher,
///     get_rooms_usecase,
/// );
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// ConnectSessionUseCase（接続のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// EventDispatcher（イベントの振り分け）
    dispatcher: Arc<EventDispatcher>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        config: ServerConfig,
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        dispatcher: Arc<EventDispatcher>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
    ) -> Self {
        Self {
            config,
            connect_session_usecase,
            dispatcher,
            get_rooms_usecase,
        }
    }

    /// Run the chat server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS origin is invalid, if the server fails to
    /// bind to the configured address, or if there's an error during server
    /// execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = self.config.cors_layer()?;
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            dispatcher: self.dispatcher,
            get_rooms_usecase: self.get_rooms_usecase,
        });
        let app = build_router(app_state, cors);

        // Bind the server to the host and port
        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("CORS origin: {}", self.config.cors_origin);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
