//! Infrastructure layer - external dependency implementations.

pub mod clock;
pub mod config;
pub mod ports;
pub mod room_repo;
