//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The room has no free seat left
    #[error("Room is full: {current}/{max} players")]
    RoomFull { current: usize, max: u8 },

    /// A player with this id already sits in the room
    #[error("Player already in room: {0}")]
    DuplicatePlayer(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
