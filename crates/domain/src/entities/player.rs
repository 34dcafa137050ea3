//! Player entity - one token on the board.

use serde::{Deserialize, Serialize};

use crate::board::BOARD_SIZE;
use crate::PlayerId;

/// Money every player starts with.
pub const STARTING_MONEY: i64 = 1500;

/// Historic default token color, used once the seat palette runs out.
pub const DEFAULT_COLOR: &str = "#FF6B00";

/// Token colors handed out by seat (join order).
const SEAT_COLORS: [&str; 4] = [DEFAULT_COLOR, "#00B4D8", "#8AC926", "#FF006E"];

/// A player seated in a room.
///
/// Only the turn rules mutate a seated player; everything else reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Board index in `0..40`.
    pub position: u8,
    pub color: String,
    /// Never negative; insolvency clamps to zero.
    pub money: i64,
    /// Owned tile indices in purchase order.
    #[serde(default)]
    pub properties: Vec<u8>,
    #[serde(default)]
    pub in_jail: bool,
}

impl Player {
    /// A fresh player on START with the starting balance.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: 0,
            color: DEFAULT_COLOR.to_string(),
            money: STARTING_MONEY,
            properties: Vec::new(),
            in_jail: false,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Name used when a player shows up without going through the lobby.
    pub fn default_name(id: &PlayerId) -> String {
        let short: String = id.as_str().chars().take(4).collect();
        format!("Player {short}")
    }

    /// Color for the player taking the given zero-based seat.
    pub fn seat_color(seat: usize) -> &'static str {
        SEAT_COLORS.get(seat).copied().unwrap_or(DEFAULT_COLOR)
    }

    pub fn owns(&self, tile_id: u8) -> bool {
        self.properties.contains(&tile_id)
    }

    /// Move forward `steps` tiles, wrapping at the board edge.
    pub(crate) fn advance(&mut self, steps: u8) -> Movement {
        let from = self.position;
        let to = ((u16::from(from) + u16::from(steps)) % u16::from(BOARD_SIZE)) as u8;
        self.position = to;
        Movement {
            to,
            passed_go: to < from,
        }
    }
}

/// Result of moving a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Movement {
    pub to: u8,
    pub passed_go: bool,
}
