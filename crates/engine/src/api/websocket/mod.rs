//! WebSocket gateway for game clients.
//!
//! One connection per `(room, player)` pair at `/ws/game/{room_id}/{player_id}`.
//! The connection task reads client frames; a separate writer task drains
//! the connection's mailbox into the socket.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use richup_domain::{ConnectionId, PlayerId, RoomId};
use richup_shared::{ClientMessage, ServerMessage};

use crate::app::App;

mod ws_session;
mod ws_turn;

#[cfg(test)]
mod test_support;

/// Buffer size for per-connection message channel.
const CONNECTION_CHANNEL_BUFFER: usize = 256;

/// Close code sent when the requested room does not exist.
pub const ROOM_NOT_FOUND_CLOSE_CODE: u16 = 4004;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path((room_id, player_id)): Path<(RoomId, PlayerId)>,
    State(app): State<Arc<App>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app, room_id, player_id))
}

/// Handle an individual WebSocket connection.
async fn handle_socket(mut socket: WebSocket, app: Arc<App>, room_id: RoomId, player_id: PlayerId) {
    // Held for the whole connection, which also pins the room in memory.
    let handle = match app.store.get(&room_id).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::info!(room_id = %room_id, player_id = %player_id, error = %e, "Refusing connection");
            let close = Message::Close(Some(CloseFrame {
                code: ROOM_NOT_FOUND_CLOSE_CODE,
                reason: "Room not found".into(),
            }));
            if let Err(e) = socket.send(close).await {
                tracing::debug!(room_id = %room_id, error = %e, "Failed to send close frame");
            }
            return;
        }
    };

    let connection_id = ConnectionId::new();
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(CONNECTION_CHANNEL_BUFFER);

    // Spawn a task to forward messages from the channel to the WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::error!(error = %e, "Failed to serialize server message"),
            }
        }
    });

    tracing::info!(
        room_id = %room_id,
        player_id = %player_id,
        connection_id = %connection_id,
        "WebSocket connection established"
    );

    ws_session::handle_join(&app, &handle, connection_id, &player_id, tx).await;

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(ClientMessage::Unknown) => {
                    tracing::debug!(connection_id = %connection_id, "Ignoring unknown message type");
                }
                Ok(msg) => {
                    ws_turn::handle_action(&app, &handle, connection_id, &player_id, msg).await;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, error = %e, "Ignoring malformed message");
                }
            },
            Ok(Message::Binary(_)) => {
                tracing::debug!(connection_id = %connection_id, "Ignoring binary frame");
            }
            Ok(Message::Close(_)) => {
                tracing::info!(connection_id = %connection_id, "WebSocket closed by client");
                break;
            }
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    ws_session::handle_leave(&app, &handle, connection_id, &player_id).await;
    send_task.abort();

    tracing::info!(connection_id = %connection_id, "WebSocket connection terminated");
}
