//! Application state and composition.

use std::sync::Arc;

use crate::api::BroadcastHub;
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::RandomPort;
use crate::stores::SessionStore;

/// Everything a request handler needs, shared via Axum state.
///
/// Built once at startup; there are no global singletons.
pub struct App {
    pub store: Arc<SessionStore>,
    pub hub: Arc<BroadcastHub>,
    pub random: Arc<dyn RandomPort>,
    pub config: EngineConfig,
}

impl App {
    pub fn new(
        store: Arc<SessionStore>,
        hub: Arc<BroadcastHub>,
        random: Arc<dyn RandomPort>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            hub,
            random,
            config,
        }
    }
}
