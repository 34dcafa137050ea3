//! Value objects.

mod dice;

pub use dice::{DiceRoll, DIE_FACES};
