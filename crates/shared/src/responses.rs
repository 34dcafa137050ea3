//! Lobby HTTP response bodies.

use serde::{Deserialize, Serialize};

use richup_domain::{Player, Room, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthJoinResponse {
    pub player: Player,
    /// Equal to the player id; there is no real authentication.
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: RoomId,
    pub room: Room,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub room_id: RoomId,
    pub player: Player,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub status: String,
}

impl StartGameResponse {
    pub fn started() -> Self {
        Self {
            status: "started".to_string(),
        }
    }
}
