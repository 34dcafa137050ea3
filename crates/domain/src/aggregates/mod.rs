//! Aggregates - consistency boundaries.

mod room;
mod roster;

pub use room::{Room, RoomSummary, DEFAULT_MAX_PLAYERS};
pub use roster::PlayerRoster;
