use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

use richup_domain::{Player, PlayerId, Room, RoomId};
use richup_shared::ServerMessage;

use crate::api::{router, BroadcastHub};
use crate::app::App;
use crate::infrastructure::clock::{ScriptedRandom, SystemClock};
use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::RoomRepo;
use crate::stores::SessionStore;

pub(crate) type TestWs =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

pub(crate) const WAIT: Duration = Duration::from_secs(2);
pub(crate) const QUIET: Duration = Duration::from_millis(200);

/// App with an in-memory store and dice scripted as `faces`, then all 1s.
pub(crate) fn build_test_app(faces: Vec<i32>, repo: Option<Arc<dyn RoomRepo>>) -> Arc<App> {
    let store = Arc::new(SessionStore::new(
        repo,
        Arc::new(SystemClock),
        Duration::from_secs(60),
    ));
    Arc::new(App::new(
        store,
        Arc::new(BroadcastHub::new()),
        Arc::new(ScriptedRandom::new(faces, 1)),
        EngineConfig::default(),
    ))
}

/// Room with the given players already seated, each at `position`.
pub(crate) fn seeded_room(room_id: &str, players: &[(&str, u8)]) -> Room {
    let mut room = Room::new(RoomId::new(room_id), None);
    for (seat, (id, position)) in players.iter().enumerate() {
        let mut player =
            Player::new(PlayerId::new(*id), id.to_uppercase()).with_color(Player::seat_color(seat));
        player.position = *position;
        room.add_player(player).unwrap();
    }
    room
}

pub(crate) async fn spawn_ws_server(app: Arc<App>) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, router(app)).await.unwrap();
    });

    (addr, handle)
}

pub(crate) async fn ws_connect(addr: SocketAddr, room_id: &str, player_id: &str) -> TestWs {
    let url = format!("ws://{}/ws/game/{}/{}", addr, room_id, player_id);
    let (ws, _resp) = connect_async(url).await.unwrap();
    ws
}

pub(crate) async fn ws_send_raw(ws: &mut TestWs, text: &str) {
    ws.send(WsMessage::Text(text.to_string())).await.unwrap();
}

pub(crate) async fn ws_send_type(ws: &mut TestWs, message_type: &str) {
    ws_send_raw(ws, &format!(r#"{{"type":"{message_type}"}}"#)).await;
}

pub(crate) async fn ws_recv_server(ws: &mut TestWs) -> ServerMessage {
    loop {
        let msg = ws.next().await.unwrap().unwrap();
        match msg {
            WsMessage::Text(text) => {
                return serde_json::from_str::<ServerMessage>(&text).unwrap();
            }
            WsMessage::Binary(bin) => {
                let text = String::from_utf8(bin).unwrap();
                return serde_json::from_str::<ServerMessage>(&text).unwrap();
            }
            _ => {}
        }
    }
}

pub(crate) async fn ws_expect_message<F>(
    ws: &mut TestWs,
    timeout: Duration,
    mut predicate: F,
) -> ServerMessage
where
    F: FnMut(&ServerMessage) -> bool,
{
    tokio::time::timeout(timeout, async {
        loop {
            let msg = ws_recv_server(ws).await;
            if predicate(&msg) {
                return msg;
            }
        }
    })
    .await
    .unwrap()
}

/// Everything that arrives within `window`.
pub(crate) async fn ws_collect_for(ws: &mut TestWs, window: Duration) -> Vec<ServerMessage> {
    let mut received = Vec::new();
    let deadline = tokio::time::Instant::now() + window;
    while let Ok(msg) = tokio::time::timeout_at(deadline, ws_recv_server(ws)).await {
        received.push(msg);
    }
    received
}

/// Connect and wait for the initial snapshot.
pub(crate) async fn ws_join(addr: SocketAddr, room_id: &str, player_id: &str) -> TestWs {
    let mut ws = ws_connect(addr, room_id, player_id).await;
    ws_expect_message(&mut ws, WAIT, |m| matches!(m, ServerMessage::RoomState { .. })).await;
    ws
}

pub(crate) fn is_update(m: &ServerMessage) -> bool {
    matches!(m, ServerMessage::UpdateState { .. })
}

pub(crate) fn is_rejection(m: &ServerMessage) -> bool {
    matches!(m, ServerMessage::ActionRejected { .. })
}
