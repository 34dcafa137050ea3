//! Rich-Up Protocol - Shared types for the Engine and game clients
//!
//! This crate contains the types both ends of the wire agree on:
//! - WebSocket message types (`ClientMessage`, `ServerMessage`)
//! - Lobby HTTP request and response bodies
//!
//! No business logic lives here. Payloads are built from domain values and
//! serialized as-is.

pub mod messages;
pub mod requests;
pub mod responses;

// =============================================================================
// WebSocket Message Types
// =============================================================================
pub use messages::{ClientMessage, GameStartedState, RoomSnapshot, ServerMessage, StateUpdate};

// =============================================================================
// HTTP Bodies
// =============================================================================
pub use requests::{AuthJoinRequest, CreateRoomRequest, JoinRoomRequest, StartGameQuery};
pub use responses::{AuthJoinResponse, CreateRoomResponse, JoinRoomResponse, StartGameResponse};
