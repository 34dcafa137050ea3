//! API layer - HTTP and WebSocket entry points.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::app::App;

pub mod connections;
pub mod http;
pub mod websocket;

pub use connections::BroadcastHub;

/// Every route the engine serves.
pub fn router(app: Arc<App>) -> Router {
    http::routes()
        .route(
            "/ws/game/{room_id}/{player_id}",
            get(websocket::ws_handler),
        )
        .with_state(app)
}
