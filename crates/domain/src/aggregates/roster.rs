//! Ordered player collection.
//!
//! Players keep their join order, which drives seat colors and turn order.
//! On the wire the roster is a JSON object keyed by player id, written in
//! join order; reading it back restores that order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entities::Player;
use crate::PlayerId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn first(&self) -> Option<&Player> {
        self.players.first()
    }

    /// The player seated after `id`, wrapping to the first seat.
    pub fn next_after(&self, id: &PlayerId) -> Option<&Player> {
        let index = self.players.iter().position(|p| &p.id == id)?;
        self.players.get((index + 1) % self.players.len())
    }

    /// Sum of every player's balance.
    pub fn total_money(&self) -> i64 {
        self.players.iter().map(|p| p.money).sum()
    }

    /// Appends a player. Callers check for duplicates first.
    pub(crate) fn push(&mut self, player: Player) {
        self.players.push(player);
    }
}

impl<'a> IntoIterator for &'a PlayerRoster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

impl Serialize for PlayerRoster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.players.len()))?;
        for player in &self.players {
            map.serialize_entry(&player.id, player)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlayerRoster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RosterVisitor;

        impl<'de> Visitor<'de> for RosterVisitor {
            type Value = PlayerRoster;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of player id to player")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut roster = PlayerRoster::new();
                while let Some((key, mut player)) = access.next_entry::<PlayerId, Player>()? {
                    // The map key is authoritative for the player's identity.
                    player.id = key;
                    if roster.contains(&player.id) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate player id {}",
                            player.id
                        )));
                    }
                    roster.push(player);
                }
                Ok(roster)
            }
        }

        deserializer.deserialize_map(RosterVisitor)
    }
}
