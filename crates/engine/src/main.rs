//! Rich-Up Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use richup_engine::api::{self, BroadcastHub};
use richup_engine::infrastructure::{
    clock::{SystemClock, SystemRandom},
    config::{load_dotenv_from_repo_root, EngineConfig},
    ports::{ClockPort, RoomRepo},
    room_repo::SqliteRoomRepo,
};
use richup_engine::stores::SessionStore;
use richup_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "richup_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Rich-Up Engine");

    let config = EngineConfig::from_env();
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let repo: Option<Arc<dyn RoomRepo>> = match config.rooms_db.as_deref() {
        Some(path) => match SqliteRoomRepo::new(path, clock.clone()).await {
            Ok(repo) => {
                tracing::info!(path, "Room snapshots stored in SQLite");
                let repo: Arc<dyn RoomRepo> = Arc::new(repo);
                Some(repo)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "Room database unavailable, running memory-only");
                None
            }
        },
        None => {
            tracing::info!("ROOMS_DB is empty, running memory-only");
            None
        }
    };

    let store = Arc::new(SessionStore::new(repo, clock, config.room_idle_timeout));
    let hub = Arc::new(BroadcastHub::new());
    let app = Arc::new(App::new(
        store.clone(),
        hub,
        Arc::new(SystemRandom),
        config.clone(),
    ));

    // Idle room sweeper
    let sweep_store = store.clone();
    let sweep_interval = config.sweep_interval;
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(sweep_interval).await;
            sweep_store.evict_idle();
        }
    });

    let mut router = api::router(app).layer(TraceLayer::new_for_http());
    if let Some(cors) = config.cors_layer() {
        router = router.layer(cors);
    }

    let addr: SocketAddr = config.bind_addr().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
