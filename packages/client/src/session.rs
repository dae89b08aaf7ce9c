//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use roomcast_server::infrastructure::dto::websocket::{InboundFrame, OutboundFrame};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    command::{Command, parse_command},
    domain::Membership,
    error::ClientError,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// How a session finished without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `/quit` or closed stdin
    Quit,
}

/// Run one WebSocket session until the user quits or the connection drops.
///
/// `membership` survives the session; when it is set on entry the room is
/// rejoined right after connecting.
pub async fn run_client_session(
    url: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    membership: &mut Option<Membership>,
) -> Result<SessionEnd, ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!("\nCommands: /join <username> <room>, /leave, /quit. Anything else is sent to your room.\n");

    let (mut write, mut read) = ws_stream.split();

    if let Some(current) = membership.as_ref() {
        tracing::info!("Rejoining '{}' as '{}'", current.room, current.username);
        send_frame(
            &mut write,
            &InboundFrame::join(&current.username, &current.room),
        )
        .await?;
    }

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<OutboundFrame>(text.as_str()) {
                        Ok(frame) => MessageFormatter::format_frame(&frame),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost);
            }
            line = input_rx.recv() => {
                // stdin closed
                let Some(line) = line else {
                    read_task.abort();
                    write.close().await.ok();
                    return Ok(SessionEnd::Quit);
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => {
                        read_task.abort();
                        write.close().await.ok();
                        return Ok(SessionEnd::Quit);
                    }
                    Ok(command) => {
                        if let Err(e) = apply_command(&mut write, command, membership).await {
                            read_task.abort();
                            return Err(e);
                        }
                    }
                    Err(e) => println!("{}", e),
                }
                redisplay_prompt();
            }
        }
    }
}

async fn apply_command(
    write: &mut WsSink,
    command: Command,
    membership: &mut Option<Membership>,
) -> Result<(), ClientError> {
    match command {
        Command::Join { username, room } => {
            send_frame(write, &InboundFrame::join(&username, &room)).await?;
            *membership = Some(Membership::new(username, room));
        }
        Command::Leave => {
            if membership.take().is_some() {
                send_frame(write, &InboundFrame::leave()).await?;
            } else {
                println!("You are not in a room.");
            }
        }
        Command::Say(text) => match membership.as_ref() {
            Some(current) => {
                send_frame(
                    write,
                    &InboundFrame::message(&current.username, &text, &current.room),
                )
                .await?;
            }
            None => println!("Join a room first: /join <username> <room>"),
        },
        Command::Quit => {}
    }
    Ok(())
}

async fn send_frame(write: &mut WsSink, frame: &InboundFrame) -> Result<(), ClientError> {
    let json = serde_json::to_string(frame)?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send frame: {}", e);
        ClientError::ConnectionLost
    })
}
