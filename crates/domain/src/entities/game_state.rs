use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Shared board state of a room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// One-way: once true it stays true.
    #[serde(default)]
    pub game_started: bool,
    /// The only player allowed to roll. `None` until the game starts.
    #[serde(default)]
    pub turn_player_id: Option<PlayerId>,
    /// Tile index -> owner. Entries are never replaced or removed.
    #[serde(default)]
    pub ownership_map: BTreeMap<u8, PlayerId>,
}

impl GameState {
    pub fn owner_of(&self, tile_id: u8) -> Option<&PlayerId> {
        self.ownership_map.get(&tile_id)
    }

    pub fn is_turn_of(&self, player_id: &PlayerId) -> bool {
        self.turn_player_id.as_ref() == Some(player_id)
    }

    /// Record a first-time owner. Returns `false` if the tile is already owned,
    /// leaving the existing entry untouched.
    pub(crate) fn claim(&mut self, tile_id: u8, owner: PlayerId) -> bool {
        match self.ownership_map.entry(tile_id) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(owner);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }
}
