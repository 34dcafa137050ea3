use super::*;

use crate::infrastructure::ports::RoomRepo;

#[tokio::test]
async fn unknown_room_is_closed_with_4004() {
    let app = build_test_app(Vec::new(), None);
    let (addr, server) = spawn_ws_server(app).await;

    let mut ws = ws_connect(addr, "NOPE01", "p1").await;
    let frame = tokio::time::timeout(WAIT, ws.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    match frame {
        WsMessage::Close(Some(close)) => {
            assert_eq!(u16::from(close.code), 4004);
            assert_eq!(close.reason, "Room not found");
        }
        other => panic!("expected close frame, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn joiner_gets_snapshot_and_others_get_player_joined() {
    let app = build_test_app(Vec::new(), None);
    app.store.create(seeded_room("ROOM01", &[])).await.unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut first = ws_connect(addr, "ROOM01", "alice-id").await;
    match ws_recv_server(&mut first).await {
        ServerMessage::RoomState { state } => {
            assert_eq!(state.room_id, RoomId::new("ROOM01"));
            assert_eq!(state.players.len(), 1);
            let me = state.players.get(&PlayerId::new("alice-id")).unwrap();
            assert_eq!(me.name, "Player alic");
            assert_eq!(me.money, 1500);
            assert!(!state.game_started);
        }
        other => panic!("expected ROOM_STATE first, got {other:?}"),
    }

    let mut second = ws_connect(addr, "ROOM01", "bob-id").await;
    match ws_recv_server(&mut second).await {
        ServerMessage::RoomState { state } => assert_eq!(state.players.len(), 2),
        other => panic!("expected ROOM_STATE first, got {other:?}"),
    }
    match ws_expect_message(&mut first, WAIT, |_| true).await {
        ServerMessage::PlayerJoined {
            player_id,
            players,
            message,
        } => {
            assert_eq!(player_id, PlayerId::new("bob-id"));
            assert_eq!(players.len(), 2);
            assert_eq!(message, "Player bob- joined");
        }
        other => panic!("expected PLAYER_JOINED, got {other:?}"),
    }

    // The joiner never hears about itself.
    let extra = ws_collect_for(&mut second, QUIET).await;
    assert!(extra.is_empty(), "unexpected messages: {extra:?}");

    server.abort();
}

#[tokio::test]
async fn reconnecting_keeps_the_existing_seat() {
    let app = build_test_app(Vec::new(), None);
    app.store
        .create(seeded_room("ROOM01", &[("p1", 7)]))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut ws = ws_connect(addr, "ROOM01", "p1").await;
    match ws_recv_server(&mut ws).await {
        ServerMessage::RoomState { state } => {
            assert_eq!(state.players.len(), 1);
            assert_eq!(state.players.get(&PlayerId::new("p1")).unwrap().position, 7);
        }
        other => panic!("expected ROOM_STATE, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn full_room_attaches_observer_whose_actions_are_rejected() {
    let app = build_test_app(Vec::new(), None);
    let seated: Vec<(&str, u8)> = vec![("a", 0), ("b", 0), ("c", 0), ("d", 0)];
    app.store
        .create(seeded_room("ROOM01", &seated))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;
    let mut seated_ws = ws_join(addr, "ROOM01", "a").await;

    let mut observer = ws_connect(addr, "ROOM01", "late").await;
    match ws_recv_server(&mut observer).await {
        ServerMessage::RoomState { state } => {
            assert_eq!(state.players.len(), 4);
            assert!(!state.players.contains(&PlayerId::new("late")));
        }
        other => panic!("expected ROOM_STATE, got {other:?}"),
    }

    ws_send_type(&mut observer, "BUY_PROPERTY").await;
    match ws_expect_message(&mut observer, WAIT, is_rejection).await {
        ServerMessage::ActionRejected { reason, .. } => {
            assert_eq!(reason, RejectReason::NotInRoom)
        }
        other => panic!("unexpected {other:?}"),
    }

    // Observers come and go without announcements.
    observer.close(None).await.unwrap();
    drop(observer);
    assert!(ws_collect_for(&mut seated_ws, QUIET).await.is_empty());
    assert_eq!(app.hub.connection_count(&RoomId::new("ROOM01")).await, 1);

    server.abort();
}

#[tokio::test]
async fn disconnect_broadcasts_player_left_and_keeps_the_seat() {
    let app = build_test_app(Vec::new(), None);
    app.store.create(seeded_room("ROOM01", &[])).await.unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut stays = ws_join(addr, "ROOM01", "stays").await;
    let mut leaves = ws_join(addr, "ROOM01", "leaves").await;
    ws_expect_message(&mut stays, WAIT, |m| {
        matches!(m, ServerMessage::PlayerJoined { .. })
    })
    .await;

    leaves.close(None).await.unwrap();
    drop(leaves);

    match ws_expect_message(&mut stays, WAIT, |m| {
        matches!(m, ServerMessage::PlayerLeft { .. })
    })
    .await
    {
        ServerMessage::PlayerLeft { player_id } => {
            assert_eq!(player_id, PlayerId::new("leaves"))
        }
        other => panic!("unexpected {other:?}"),
    }

    let room = app
        .store
        .get(&RoomId::new("ROOM01"))
        .await
        .unwrap()
        .peek()
        .await;
    assert!(room.contains_player(&PlayerId::new("leaves")));
    assert_eq!(app.hub.connection_count(&RoomId::new("ROOM01")).await, 1);

    server.abort();
}

#[tokio::test]
async fn leaving_waits_for_the_room_lock() {
    let app = build_test_app(Vec::new(), None);
    app.store.create(seeded_room("ROOM01", &[])).await.unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut stays = ws_join(addr, "ROOM01", "stays").await;
    let mut leaves = ws_join(addr, "ROOM01", "leaves").await;
    ws_expect_message(&mut stays, WAIT, |m| {
        matches!(m, ServerMessage::PlayerJoined { .. })
    })
    .await;

    let handle = app.store.get(&RoomId::new("ROOM01")).await.unwrap();
    let guard = handle.lock().await;
    leaves.close(None).await.unwrap();
    drop(leaves);

    // Nothing about the departure goes out while someone else holds the room.
    assert!(ws_collect_for(&mut stays, QUIET).await.is_empty());
    assert_eq!(app.hub.connection_count(&RoomId::new("ROOM01")).await, 2);

    drop(guard);
    match ws_expect_message(&mut stays, WAIT, |m| {
        matches!(m, ServerMessage::PlayerLeft { .. })
    })
    .await
    {
        ServerMessage::PlayerLeft { player_id } => {
            assert_eq!(player_id, PlayerId::new("leaves"))
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(app.hub.connection_count(&RoomId::new("ROOM01")).await, 1);

    server.abort();
}

#[tokio::test]
async fn malformed_and_unknown_frames_are_ignored() {
    let app = build_test_app(vec![1, 2], None);
    app.store
        .create(seeded_room("ROOM01", &[("p1", 0)]))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;
    let mut ws = ws_join(addr, "ROOM01", "p1").await;

    ws_send_raw(&mut ws, "not json").await;
    ws_send_raw(&mut ws, r#"{"type":"TRADE"}"#).await;
    ws_send_raw(&mut ws, r#"{"no_type":true}"#).await;
    assert!(ws_collect_for(&mut ws, QUIET).await.is_empty());

    // The connection is still serviced afterwards.
    ws_send_type(&mut ws, "ROLL_DICE").await;
    match ws_expect_message(&mut ws, WAIT, |_| true).await {
        ServerMessage::ActionRejected { reason, .. } => {
            assert_eq!(reason, RejectReason::GameNotStarted)
        }
        other => panic!("unexpected {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn joins_are_persisted_when_storage_is_configured() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rooms.db");
    let repo = crate::infrastructure::room_repo::SqliteRoomRepo::new(
        path.to_str().unwrap(),
        Arc::new(crate::infrastructure::clock::SystemClock),
    )
    .await
    .unwrap();
    let repo: Arc<dyn RoomRepo> = Arc::new(repo);

    let app = build_test_app(Vec::new(), Some(repo.clone()));
    app.store.create(seeded_room("ROOM01", &[])).await.unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;
    let _ws = ws_join(addr, "ROOM01", "p1").await;

    let stored = repo.get(&RoomId::new("ROOM01")).await.unwrap().unwrap();
    assert!(stored.contains_player(&PlayerId::new("p1")));

    server.abort();
}
