//! Room aggregate - one isolated game session.
//!
//! # Invariants
//!
//! - a player id appears at most once in the roster
//! - the roster never grows past `max_players`
//! - every key of the ownership map names a seated player and a property tile
//! - no player's balance is negative
//!
//! Fields are private; the turn rules in [`crate::turn`] are the only code
//! that mutates seated players or the ownership map.

use serde::{Deserialize, Serialize};

use super::PlayerRoster;
use crate::entities::{GameState, Player};
use crate::{DomainError, PlayerId, RoomId};

/// Seats per room unless the lobby says otherwise.
pub const DEFAULT_MAX_PLAYERS: u8 = 4;

fn default_max_players() -> u8 {
    DEFAULT_MAX_PLAYERS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    room_id: RoomId,
    #[serde(default)]
    host_id: Option<PlayerId>,
    #[serde(default)]
    players: PlayerRoster,
    #[serde(default)]
    state: GameState,
    #[serde(default = "default_max_players")]
    max_players: u8,
}

impl Room {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// Empty room with a fresh game state.
    pub fn new(room_id: RoomId, host_id: Option<PlayerId>) -> Self {
        Self {
            room_id,
            host_id,
            players: PlayerRoster::new(),
            state: GameState::default(),
            max_players: DEFAULT_MAX_PLAYERS,
        }
    }

    pub fn with_max_players(mut self, max_players: u8) -> Result<Self, DomainError> {
        if max_players == 0 {
            return Err(DomainError::validation("max_players must be at least 1"));
        }
        if usize::from(max_players) < self.players.len() {
            return Err(DomainError::validation(
                "max_players cannot be lower than the seated player count",
            ));
        }
        self.max_players = max_players;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    #[inline]
    pub fn host_id(&self) -> Option<&PlayerId> {
        self.host_id.as_ref()
    }

    #[inline]
    pub fn players(&self) -> &PlayerRoster {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn contains_player(&self, id: &PlayerId) -> bool {
        self.players.contains(id)
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn max_players(&self) -> u8 {
        self.max_players
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= usize::from(self.max_players)
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            room_id: self.room_id.clone(),
            players: self.players.len(),
            max_players: self.max_players,
            game_started: self.state.game_started,
        }
    }

    // =========================================================================
    // Seating
    // =========================================================================

    /// Seat an already-built player.
    pub fn add_player(&mut self, player: Player) -> Result<(), DomainError> {
        if self.players.contains(&player.id) {
            return Err(DomainError::DuplicatePlayer(player.id.to_string()));
        }
        if self.is_full() {
            return Err(DomainError::RoomFull {
                current: self.players.len(),
                max: self.max_players,
            });
        }
        self.players.push(player);
        Ok(())
    }

    /// Seat a new player with the default balance and the next seat color.
    pub fn admit(&mut self, id: PlayerId, name: impl Into<String>) -> Result<&Player, DomainError> {
        let color = Player::seat_color(self.players.len());
        let player = Player::new(id.clone(), name).with_color(color);
        self.add_player(player)?;
        self.players
            .get(&id)
            .ok_or_else(|| DomainError::validation("seated player vanished"))
    }

    // =========================================================================
    // Rule-engine mutation (crate only)
    // =========================================================================

    pub(crate) fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

/// Lobby listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub players: usize,
    pub max_players: u8,
    pub game_started: bool,
}
