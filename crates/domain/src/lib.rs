//! Rich-Up Domain - the board, rooms, players and turn rules.
//!
//! Everything in this crate is synchronous and free of I/O. The engine
//! crate owns storage, randomness and transport.

pub mod aggregates;
pub mod board;
pub mod entities;
pub mod error;
pub mod ids;
pub mod turn;
pub mod value_objects;

pub use aggregates::{PlayerRoster, Room, RoomSummary, DEFAULT_MAX_PLAYERS};
pub use board::{Tile, TileKind, BOARD};
pub use entities::{GameState, Player, STARTING_MONEY};
pub use error::DomainError;
pub use ids::{ConnectionId, PlayerId, RoomId};
pub use turn::{Action, RejectReason, Resolution, TurnEvent};
pub use value_objects::DiceRoll;
