//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Durable room storage (SQLite today)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::RoomRepo;
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use repos::MockRoomRepo;
#[cfg(test)]
pub use testing::MockRandomPort;
