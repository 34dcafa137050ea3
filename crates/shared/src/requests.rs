//! Lobby HTTP request bodies.

use serde::{Deserialize, Serialize};

use richup_domain::{PlayerId, RoomId};

/// `POST /api/auth/join`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthJoinRequest {
    pub name: String,
}

/// `POST /api/lobby/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub host_id: PlayerId,
}

/// `POST /api/lobby/join`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: RoomId,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// Query string of `POST /api/game/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameQuery {
    pub room_id: RoomId,
}
