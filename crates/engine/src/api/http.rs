//! HTTP routes: health, player sign-in, lobby and game start.

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use richup_domain::turn::{self, RejectReason, Resolution};
use richup_domain::{DomainError, Player, PlayerId, Room, RoomId, RoomSummary, Tile, BOARD};
use richup_shared::{
    AuthJoinRequest, AuthJoinResponse, CreateRoomRequest, CreateRoomResponse, JoinRoomRequest,
    JoinRoomResponse, ServerMessage, StartGameQuery, StartGameResponse,
};

use crate::app::App;
use crate::stores::SessionError;

/// Fresh room codes to try before giving up on a collision streak.
const ROOM_CODE_ATTEMPTS: usize = 8;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/auth/join", post(auth_join))
        .route("/api/lobby/create", post(create_room))
        .route("/api/lobby/join", post(join_room))
        .route("/api/lobby/list", get(list_rooms))
        .route("/api/game/config", get(board_config))
        .route("/api/game/start", post(start_game))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Auth
// =============================================================================

/// Issue a player id. The id doubles as the token; nothing is stored.
async fn auth_join(
    State(app): State<Arc<App>>,
    Json(request): Json<AuthJoinRequest>,
) -> Result<Json<AuthJoinResponse>, ApiError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Name is required".to_string()));
    }

    let player_id = PlayerId::from_uuid(app.random.gen_uuid());
    let player = Player::new(player_id.clone(), name);
    Ok(Json(AuthJoinResponse {
        player,
        token: player_id.to_string(),
    }))
}

// =============================================================================
// Lobby
// =============================================================================

async fn create_room(
    State(app): State<Arc<App>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    for _ in 0..ROOM_CODE_ATTEMPTS {
        let room_id = RoomId::from_uuid(app.random.gen_uuid());
        let room = Room::new(room_id.clone(), Some(request.host_id.clone()))
            .with_max_players(app.config.max_players)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        match app.store.create(room.clone()).await {
            Ok(_) => return Ok(Json(CreateRoomResponse { room_id, room })),
            Err(SessionError::AlreadyExists(_)) => {
                tracing::debug!(room_id = %room_id, "Room code collision, retrying");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(ApiError::Internal("Could not allocate a room code".to_string()))
}

/// Seat a player through the lobby. Rejoining returns the existing seat.
async fn join_room(
    State(app): State<Arc<App>>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, ApiError> {
    let handle = app.store.get(&request.room_id).await?;
    let mut room = handle.lock().await;
    let room_id = room.room_id().clone();

    if let Some(existing) = room.player(&request.player_id) {
        return Ok(Json(JoinRoomResponse {
            room_id,
            player: existing.clone(),
        }));
    }

    let name = match request.player_name.trim() {
        "" => Player::default_name(&request.player_id),
        name => name.to_string(),
    };
    let player = room
        .admit(request.player_id.clone(), name)
        .map_err(|e| match e {
            DomainError::RoomFull { .. } => ApiError::BadRequest("Room is full".to_string()),
            other => ApiError::BadRequest(other.to_string()),
        })?
        .clone();

    if let Err(e) = app.store.persist(&mut room).await {
        tracing::warn!(room_id = %room_id, error = %e, "Failed to persist room after lobby join");
    }
    app.hub
        .broadcast(
            &room_id,
            ServerMessage::player_joined(&room, &player.id, format!("{} joined", player.name)),
        )
        .await;

    Ok(Json(JoinRoomResponse { room_id, player }))
}

async fn list_rooms(State(app): State<Arc<App>>) -> Json<Vec<RoomSummary>> {
    Json(app.store.list().await)
}

// =============================================================================
// Game
// =============================================================================

async fn board_config() -> Json<&'static [Tile]> {
    Json(BOARD.as_slice())
}

async fn start_game(
    State(app): State<Arc<App>>,
    Query(query): Query<StartGameQuery>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let handle = app.store.get(&query.room_id).await?;
    let mut room = handle.lock().await;
    let room_id = room.room_id().clone();

    match turn::start_game(&room) {
        Resolution::Accepted { room: next, event } => {
            *room = next;
            if let Err(e) = app.store.persist(&mut room).await {
                tracing::warn!(room_id = %room_id, error = %e, "Failed to persist room after start");
            }
            tracing::info!(room_id = %room_id, log = %event.message, "Game started");
            app.hub
                .broadcast(&room_id, ServerMessage::game_started(&room))
                .await;
            Ok(Json(StartGameResponse::started()))
        }
        Resolution::Rejected(RejectReason::AlreadyStarted) => {
            Err(ApiError::Conflict(RejectReason::AlreadyStarted.to_string()))
        }
        Resolution::Rejected(reason) => Err(ApiError::BadRequest(reason.to_string())),
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::BadRequest(msg) => {
                (axum::http::StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::Conflict(msg) => (axum::http::StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error",
                )
                    .into_response()
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => ApiError::NotFound("Room not found".to_string()),
            SessionError::AlreadyExists(_) => ApiError::Conflict(e.to_string()),
        }
    }
}
