//! Two six-sided dice.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Faces per die.
pub const DIE_FACES: u8 = 6;

/// A pair of dice values, each in `1..=6`.
///
/// Serializes as a two-element array (`[3, 4]`), the `last_roll` wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct DiceRoll {
    first: u8,
    second: u8,
}

impl DiceRoll {
    pub fn new(first: u8, second: u8) -> Result<Self, DomainError> {
        for value in [first, second] {
            if !(1..=DIE_FACES).contains(&value) {
                return Err(DomainError::validation(format!(
                    "die value {value} outside 1..={DIE_FACES}"
                )));
            }
        }
        Ok(Self { first, second })
    }

    /// Roll both dice with an injected source of die faces.
    ///
    /// The source is asked for exactly two values; anything outside `1..=6`
    /// is clamped onto the die.
    pub fn roll(mut die: impl FnMut() -> u8) -> Self {
        let first = die().clamp(1, DIE_FACES);
        let second = die().clamp(1, DIE_FACES);
        Self { first, second }
    }

    pub fn first(&self) -> u8 {
        self.first
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn total(&self) -> u8 {
        self.first + self.second
    }

    pub fn is_doubles(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl TryFrom<[u8; 2]> for DiceRoll {
    type Error = DomainError;

    fn try_from([first, second]: [u8; 2]) -> Result<Self, Self::Error> {
        Self::new(first, second)
    }
}

impl From<DiceRoll> for [u8; 2] {
    fn from(roll: DiceRoll) -> Self {
        [roll.first, roll.second]
    }
}
