//! Engine configuration from the environment.

use std::path::Path;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use richup_domain::DEFAULT_MAX_PLAYERS;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ROOMS_DB: &str = "rooms.db";
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30 * 60;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    /// SQLite file for room snapshots; `None` runs memory-only.
    pub rooms_db: Option<String>,
    pub room_idle_timeout: Duration,
    pub sweep_interval: Duration,
    /// Seats in rooms created through the lobby.
    pub max_players: u8,
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            rooms_db: Some(DEFAULT_ROOMS_DB.to_string()),
            room_idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
            max_players: DEFAULT_MAX_PLAYERS,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let trimmed = |key: &str| lookup(key).map(|value| value.trim().to_string());
        let secs = |key: &str, default: Duration| {
            trimmed(key)
                .and_then(|value| value.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            server_host: trimmed("SERVER_HOST")
                .filter(|host| !host.is_empty())
                .unwrap_or(defaults.server_host),
            server_port: trimmed("SERVER_PORT")
                .or_else(|| trimmed("PORT"))
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.server_port),
            rooms_db: match trimmed("ROOMS_DB") {
                Some(path) if path.is_empty() => None,
                Some(path) => Some(path),
                None => defaults.rooms_db,
            },
            room_idle_timeout: secs("ROOM_IDLE_TIMEOUT_SECS", defaults.room_idle_timeout),
            sweep_interval: secs("ROOM_SWEEP_INTERVAL_SECS", defaults.sweep_interval),
            max_players: trimmed("ROOM_MAX_PLAYERS")
                .and_then(|value| value.parse::<u8>().ok())
                .filter(|seats| *seats > 0)
                .unwrap_or(defaults.max_players),
            cors_allowed_origins: trimmed("CORS_ALLOWED_ORIGINS").filter(|s| !s.is_empty()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// CORS layer for the configured origins, if any.
    pub fn cors_layer(&self) -> Option<CorsLayer> {
        let allowed_origins = self.cors_allowed_origins.as_deref()?;

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([axum::http::header::CONTENT_TYPE]);

        if allowed_origins == "*" {
            return Some(cors.allow_origin(Any));
        }

        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }
        Some(cors.allow_origin(origins))
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
