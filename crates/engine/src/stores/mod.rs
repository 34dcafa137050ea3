//! In-memory state storage.
//!
//! - `SessionStore` - live rooms, each behind its own async lock

pub mod session;

pub use session::{RoomGuard, RoomHandle, SessionError, SessionStore};
