//! WebSocket messages exchanged during a game session.
//!
//! Both directions use a JSON object with a `type` tag in
//! SCREAMING_SNAKE_CASE. Field names (`players`, `ownership`, `last_roll`,
//! `game_log`, `game_started`) are what browser clients read and must not
//! change.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use richup_domain::{Action, DiceRoll, PlayerId, PlayerRoster, RejectReason, Room, RoomId, TurnEvent};

// =============================================================================
// Client -> Engine
// =============================================================================

/// Messages sent from a game client to the Engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientMessage {
    /// Roll the dice and move. The Engine draws the dice.
    RollDice,
    /// Buy the property under the sender's token.
    BuyProperty,
    /// Unknown message type for forward compatibility; ignored.
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Engine -> Client
// =============================================================================

/// Messages sent from the Engine to game clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Full snapshot, sent only to the connection that just joined.
    RoomState { state: RoomSnapshot },
    PlayerJoined {
        player_id: PlayerId,
        players: PlayerRoster,
        message: String,
    },
    PlayerLeft { player_id: PlayerId },
    /// Result of an accepted action, sent to the whole room.
    UpdateState { state: StateUpdate },
    GameStarted { state: GameStartedState },
    /// Sent to the actor only; room state is unchanged.
    ActionRejected {
        action: String,
        reason: RejectReason,
        message: String,
    },
}

// Tile ids are written as JSON object keys. Tagged enums buffer their
// content before decoding, and buffered keys only come back as strings, so
// the keys are parsed by hand.
mod serde_with_tile_key {
    use super::*;
    use serde::de::Error as DeError;

    pub fn serialize<S>(map: &BTreeMap<u8, PlayerId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(map.iter().map(|(tile, owner)| (tile.to_string(), owner)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u8, PlayerId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, PlayerId> = Deserialize::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, owner)| {
                key.parse::<u8>()
                    .map(|tile| (tile, owner))
                    .map_err(|e| DeError::custom(format!("Invalid tile id '{key}': {e}")))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub players: PlayerRoster,
    #[serde(with = "serde_with_tile_key")]
    pub ownership: BTreeMap<u8, PlayerId>,
    pub game_started: bool,
    pub turn_player_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub players: PlayerRoster,
    #[serde(with = "serde_with_tile_key")]
    pub ownership: BTreeMap<u8, PlayerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_roll: Option<DiceRoll>,
    pub game_log: String,
    pub turn_player_id: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStartedState {
    pub players: PlayerRoster,
    pub game_started: bool,
    pub turn_player_id: Option<PlayerId>,
}

impl ServerMessage {
    pub fn room_state(room: &Room) -> Self {
        Self::RoomState {
            state: RoomSnapshot {
                room_id: room.room_id().clone(),
                players: room.players().clone(),
                ownership: room.state().ownership_map.clone(),
                game_started: room.state().game_started,
                turn_player_id: room.state().turn_player_id.clone(),
            },
        }
    }

    pub fn player_joined(room: &Room, player_id: &PlayerId, message: impl Into<String>) -> Self {
        Self::PlayerJoined {
            player_id: player_id.clone(),
            players: room.players().clone(),
            message: message.into(),
        }
    }

    pub fn player_left(player_id: &PlayerId) -> Self {
        Self::PlayerLeft {
            player_id: player_id.clone(),
        }
    }

    /// Broadcast for an accepted action; `room` is the committed state.
    pub fn update_state(room: &Room, event: &TurnEvent) -> Self {
        Self::UpdateState {
            state: StateUpdate {
                players: room.players().clone(),
                ownership: room.state().ownership_map.clone(),
                last_roll: event.last_roll,
                game_log: event.message.clone(),
                turn_player_id: room.state().turn_player_id.clone(),
            },
        }
    }

    pub fn game_started(room: &Room) -> Self {
        Self::GameStarted {
            state: GameStartedState {
                players: room.players().clone(),
                game_started: room.state().game_started,
                turn_player_id: room.state().turn_player_id.clone(),
            },
        }
    }

    pub fn action_rejected(action: &Action, reason: RejectReason) -> Self {
        Self::ActionRejected {
            action: action.name().to_string(),
            reason,
            message: reason.to_string(),
        }
    }
}
