//! Domain entities.

mod game_state;
mod player;

pub use game_state::GameState;
pub use player::{Player, DEFAULT_COLOR, STARTING_MONEY};
