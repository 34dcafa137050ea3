//! Connection registry and room fan-out for WebSocket clients.
//!
//! Delivery is best effort: each connection has a bounded mailbox drained by
//! its own writer task, and a full or closed mailbox only costs that
//! connection the message.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};

use richup_domain::{ConnectionId, PlayerId, RoomId};
use richup_shared::ServerMessage;

struct ConnectionEntry {
    player_id: PlayerId,
    sender: mpsc::Sender<ServerMessage>,
}

/// Live connections grouped by room.
pub struct BroadcastHub {
    rooms: RwLock<HashMap<RoomId, HashMap<ConnectionId, ConnectionEntry>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Attach a connection to a room.
    pub async fn connect(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        player_id: PlayerId,
        sender: mpsc::Sender<ServerMessage>,
    ) {
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id, ConnectionEntry { player_id, sender });
        tracing::debug!(room_id = %room_id, connection_id = %connection_id, "Connection attached");
    }

    /// Detach a connection; returns the player it belonged to.
    pub async fn disconnect(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Option<PlayerId> {
        let mut rooms = self.rooms.write().await;
        let connections = rooms.get_mut(room_id)?;
        let removed = connections.remove(&connection_id);
        if connections.is_empty() {
            rooms.remove(room_id);
        }
        if removed.is_some() {
            tracing::debug!(room_id = %room_id, connection_id = %connection_id, "Connection detached");
        }
        removed.map(|entry| entry.player_id)
    }

    /// Send to every connection in the room. Returns how many accepted it.
    pub async fn broadcast(&self, room_id: &RoomId, message: ServerMessage) -> usize {
        self.fan_out(room_id, None, message).await
    }

    /// Send to every connection in the room but one.
    pub async fn broadcast_except(
        &self,
        room_id: &RoomId,
        except: ConnectionId,
        message: ServerMessage,
    ) -> usize {
        self.fan_out(room_id, Some(except), message).await
    }

    /// Send to a single connection.
    pub async fn send_to(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        message: ServerMessage,
    ) -> bool {
        let rooms = self.rooms.read().await;
        let Some(entry) = rooms.get(room_id).and_then(|c| c.get(&connection_id)) else {
            return false;
        };
        deliver(connection_id, entry, message)
    }

    pub async fn connection_count(&self, room_id: &RoomId) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).map_or(0, HashMap::len)
    }

    async fn fan_out(
        &self,
        room_id: &RoomId,
        except: Option<ConnectionId>,
        message: ServerMessage,
    ) -> usize {
        let rooms = self.rooms.read().await;
        let Some(connections) = rooms.get(room_id) else {
            return 0;
        };
        let mut delivered = 0;
        for (id, entry) in connections {
            if Some(*id) == except {
                continue;
            }
            if deliver(*id, entry, message.clone()) {
                delivered += 1;
            }
        }
        delivered
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver(connection_id: ConnectionId, entry: &ConnectionEntry, message: ServerMessage) -> bool {
    match entry.sender.try_send(message) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                connection_id = %connection_id,
                player_id = %entry.player_id,
                error = %e,
                "Failed to deliver message"
            );
            false
        }
    }
}
