//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, Stream, StreamExt},
};
use tokio::sync::{mpsc, watch};

use crate::{
    domain::{ClientEvent, ConnectionId, ConnectionIdFactory},
    infrastructure::dto::conversion::parse_client_event,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: frames broadcast to this connection's
/// room (via rx channel) are written to the socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    // register only after the upgrade succeeded so a failed handshake leaves nothing behind
    if let Err(e) = state
        .connect_session_usecase
        .execute(connection_id.clone(), tx)
        .await
    {
        tracing::warn!("Rejecting connection '{}': {}", connection_id, e);
        return;
    }

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let (stop_tx, stop_rx) = watch::channel(false);
    let mut recv_task = tokio::spawn(receive_loop(
        receiver,
        stop_rx,
        state.clone(),
        connection_id.clone(),
    ));

    // If any one of the tasks completes, stop the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => {
            // a frame being dispatched is allowed to finish
            stop_tx.send(true).ok();
            (&mut recv_task).await.ok();
        }
    };

    state
        .dispatcher
        .handle(&connection_id, ClientEvent::Disconnect)
        .await;
}

/// Receives events from this client until the stream ends or `stop` fires.
///
/// Events of one connection are handled strictly one after another. Only the
/// wait for the next frame is interrupted by `stop`, never a dispatch.
async fn receive_loop<S>(
    mut receiver: S,
    mut stop: watch::Receiver<bool>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) where
    S: Stream<Item = Result<Message, axum::Error>> + Unpin,
{
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = stop.changed() => {
                tracing::debug!("Stopped receiving from '{}'", connection_id);
                break;
            }
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => {
                handle_text(&state, &connection_id, text.as_str()).await;
            }
            Message::Close(_) => {
                tracing::debug!("Client '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}

async fn handle_text(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match parse_client_event(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    let emitted = state.dispatcher.handle(connection_id, event).await;
    tracing::debug!(
        "Handled frame from '{}', {} event(s) broadcast",
        connection_id,
        emitted.len()
    );
}
