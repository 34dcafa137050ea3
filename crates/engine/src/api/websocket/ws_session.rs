//! Join and leave handling for game connections.

use tokio::sync::mpsc;

use richup_domain::{ConnectionId, Player, PlayerId};
use richup_shared::ServerMessage;

use crate::app::App;
use crate::stores::RoomHandle;

/// Seat the player if needed, then announce the connection.
///
/// A new player id is seated with a default name while there is room. When
/// the room is full the connection still attaches and only observes.
pub(super) async fn handle_join(
    app: &App,
    handle: &RoomHandle,
    connection_id: ConnectionId,
    player_id: &PlayerId,
    sender: mpsc::Sender<ServerMessage>,
) {
    let mut room = handle.lock().await;
    let room_id = room.room_id().clone();

    if !room.contains_player(player_id) {
        if room.is_full() {
            tracing::info!(
                room_id = %room_id,
                player_id = %player_id,
                "Room is full, attaching as observer"
            );
        } else {
            match room.admit(player_id.clone(), Player::default_name(player_id)) {
                Ok(player) => {
                    tracing::info!(room_id = %room_id, player_id = %player_id, name = %player.name, "Player seated");
                }
                Err(e) => {
                    tracing::warn!(room_id = %room_id, player_id = %player_id, error = %e, "Could not seat player");
                }
            }
            if let Err(e) = app.store.persist(&mut room).await {
                tracing::warn!(room_id = %room_id, error = %e, "Failed to persist room after join");
            }
        }
    }

    app.hub
        .connect(&room_id, connection_id, player_id.clone(), sender)
        .await;
    app.hub
        .send_to(&room_id, connection_id, ServerMessage::room_state(&room))
        .await;

    // Observers are not announced.
    let Some(name) = room.player(player_id).map(|p| p.name.clone()) else {
        return;
    };
    app.hub
        .broadcast_except(
            &room_id,
            connection_id,
            ServerMessage::player_joined(&room, player_id, format!("{name} joined")),
        )
        .await;
}

/// Detach the connection and tell the room. The player keeps their seat;
/// observers leave silently.
pub(super) async fn handle_leave(
    app: &App,
    handle: &RoomHandle,
    connection_id: ConnectionId,
    player_id: &PlayerId,
) {
    let room = handle.lock().await;
    let room_id = room.room_id();
    app.hub.disconnect(room_id, connection_id).await;
    if room.contains_player(player_id) {
        app.hub
            .broadcast(room_id, ServerMessage::player_left(player_id))
            .await;
    }
    tracing::info!(room_id = %room_id, player_id = %player_id, "Player left");
}
