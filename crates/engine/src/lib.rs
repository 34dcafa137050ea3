//! Rich-Up Engine library.
//!
//! Server side of the game: room sessions, the WebSocket gateway and the
//! lobby HTTP API.
//!
//! ## Structure
//!
//! - `stores/` - live room cache with per-room locking
//! - `infrastructure/` - ports and their implementations (SQLite, clock, config)
//! - `api/` - HTTP and WebSocket entry points
//! - `app` - application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;

pub use app::App;
