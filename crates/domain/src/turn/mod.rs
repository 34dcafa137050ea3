//! Turn resolution rules.
//!
//! Every rule is a pure function of the current room: it never touches the
//! input, and on acceptance returns the next room together with a
//! human-readable event. A rejection therefore cannot leave partial state
//! behind. Dice are drawn by the caller and passed in.

mod purchase;
mod rent;
mod roll;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::value_objects::DiceRoll;
use crate::{PlayerId, Room};

pub use rent::RentOutcome;

/// A player action the rules know how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RollDice(DiceRoll),
    BuyProperty,
}

impl Action {
    /// Wire name of the client message that carries this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RollDice(_) => "ROLL_DICE",
            Self::BuyProperty => "BUY_PROPERTY",
        }
    }
}

/// What happened, for the room's game log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEvent {
    /// Dice behind this event, if any were rolled.
    pub last_roll: Option<DiceRoll>,
    pub message: String,
}

/// Why an action was refused. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    #[error("Player is not seated in this room")]
    NotInRoom,
    #[error("The game has not started yet")]
    GameNotStarted,
    #[error("It is not your turn")]
    NotYourTurn,
    #[error("This tile cannot be bought")]
    NotPurchasable,
    #[error("This property is already owned")]
    AlreadyOwned,
    #[error("Not enough money to buy this property")]
    InsufficientFunds,
    #[error("The game has already started")]
    AlreadyStarted,
    #[error("The room has no players")]
    NoPlayers,
}

/// Outcome of applying a rule to a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accepted { room: Room, event: TurnEvent },
    Rejected(RejectReason),
}

impl Resolution {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Resolve `action` taken by `actor` against `room`.
pub fn resolve(room: &Room, actor: &PlayerId, action: Action) -> Resolution {
    match action {
        Action::RollDice(dice) => roll::roll_dice(room, actor, dice),
        Action::BuyProperty => purchase::buy_property(room, actor),
    }
}

/// Start the game: the first seated player gets the first turn.
pub fn start_game(room: &Room) -> Resolution {
    if room.state().game_started {
        return Resolution::Rejected(RejectReason::AlreadyStarted);
    }
    let Some(first) = room.players().first().map(|p| p.id.clone()) else {
        return Resolution::Rejected(RejectReason::NoPlayers);
    };

    let mut next = room.clone();
    let state = next.state_mut();
    state.game_started = true;
    state.turn_player_id = Some(first.clone());

    let message = match next.player(&first) {
        Some(player) => format!("Game started. {} goes first.", player.name),
        None => "Game started.".to_string(),
    };
    Resolution::Accepted {
        room: next,
        event: TurnEvent {
            last_roll: None,
            message,
        },
    }
}
