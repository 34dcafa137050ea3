use super::*;

use richup_domain::turn::{start_game, Resolution};
use richup_domain::{DiceRoll, Room};

use crate::infrastructure::ports::{MockRoomRepo, RepoError, RoomRepo};

fn started(room: Room) -> Room {
    match start_game(&room) {
        Resolution::Accepted { room, .. } => room,
        Resolution::Rejected(reason) => panic!("start rejected: {reason}"),
    }
}

#[tokio::test]
async fn roll_is_broadcast_to_the_whole_room() {
    let app = build_test_app(vec![3, 4], None);
    app.store
        .create(started(seeded_room("ROOM01", &[("a", 0), ("b", 0)])))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut a = ws_join(addr, "ROOM01", "a").await;
    let mut b = ws_join(addr, "ROOM01", "b").await;
    ws_send_type(&mut a, "ROLL_DICE").await;

    for ws in [&mut a, &mut b] {
        match ws_expect_message(ws, WAIT, is_update).await {
            ServerMessage::UpdateState { state } => {
                assert_eq!(state.last_roll, Some(DiceRoll::new(3, 4).unwrap()));
                assert_eq!(state.players.get(&PlayerId::new("a")).unwrap().position, 7);
                assert_eq!(state.turn_player_id, Some(PlayerId::new("b")));
                assert!(state.game_log.starts_with("Rolled 7."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    server.abort();
}

#[tokio::test]
async fn rejection_reaches_only_the_actor() {
    let app = build_test_app(Vec::new(), None);
    app.store
        .create(started(seeded_room("ROOM01", &[("a", 0), ("b", 0)])))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut a = ws_join(addr, "ROOM01", "a").await;
    let mut b = ws_join(addr, "ROOM01", "b").await;
    ws_expect_message(&mut a, WAIT, |m| {
        matches!(m, ServerMessage::PlayerJoined { .. })
    })
    .await;

    ws_send_type(&mut b, "ROLL_DICE").await;
    match ws_expect_message(&mut b, WAIT, |_| true).await {
        ServerMessage::ActionRejected {
            action,
            reason,
            message,
        } => {
            assert_eq!(action, "ROLL_DICE");
            assert_eq!(reason, RejectReason::NotYourTurn);
            assert_eq!(message, "It is not your turn");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(ws_collect_for(&mut a, QUIET).await.is_empty());

    let room = app
        .store
        .get(&RoomId::new("ROOM01"))
        .await
        .unwrap()
        .peek()
        .await;
    assert_eq!(room.state().turn_player_id, Some(PlayerId::new("a")));

    server.abort();
}

#[tokio::test]
async fn buying_out_of_turn_is_allowed() {
    let app = build_test_app(Vec::new(), None);
    app.store
        .create(started(seeded_room("ROOM01", &[("a", 0), ("b", 3)])))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut b = ws_join(addr, "ROOM01", "b").await;
    ws_send_type(&mut b, "BUY_PROPERTY").await;
    match ws_expect_message(&mut b, WAIT, is_update).await {
        ServerMessage::UpdateState { state } => {
            assert_eq!(state.ownership.get(&3), Some(&PlayerId::new("b")));
            assert_eq!(state.last_roll, None);
            assert_eq!(state.players.get(&PlayerId::new("b")).unwrap().money, 1440);
        }
        other => panic!("unexpected {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn concurrent_buys_of_one_tile_have_a_single_winner() {
    let app = build_test_app(Vec::new(), None);
    app.store
        .create(started(seeded_room("ROOM01", &[("a", 6), ("b", 6)])))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;

    let mut a = ws_join(addr, "ROOM01", "a").await;
    let mut b = ws_join(addr, "ROOM01", "b").await;
    ws_expect_message(&mut a, WAIT, |m| {
        matches!(m, ServerMessage::PlayerJoined { .. })
    })
    .await;

    tokio::join!(
        ws_send_type(&mut a, "BUY_PROPERTY"),
        ws_send_type(&mut b, "BUY_PROPERTY")
    );
    let (seen_a, seen_b) = tokio::join!(
        ws_collect_for(&mut a, Duration::from_millis(500)),
        ws_collect_for(&mut b, Duration::from_millis(500))
    );

    // Both sockets see the one accepted purchase.
    assert_eq!(seen_a.iter().filter(|m| is_update(m)).count(), 1);
    assert_eq!(seen_b.iter().filter(|m| is_update(m)).count(), 1);

    let rejections: Vec<_> = seen_a
        .iter()
        .chain(seen_b.iter())
        .filter_map(|m| match m {
            ServerMessage::ActionRejected { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(rejections, vec![RejectReason::AlreadyOwned]);

    let room = app
        .store
        .get(&RoomId::new("ROOM01"))
        .await
        .unwrap()
        .peek()
        .await;
    let owner = room.state().owner_of(6).unwrap().clone();
    let buyers: Vec<_> = room
        .players()
        .iter()
        .filter(|p| p.owns(6))
        .map(|p| p.id.clone())
        .collect();
    assert_eq!(buyers, vec![owner]);
    assert_eq!(room.players().total_money(), 2 * 1500 - 100);

    server.abort();
}

#[tokio::test]
async fn storage_failures_do_not_stop_play() {
    let mut repo = MockRoomRepo::new();
    repo.expect_get()
        .returning(|_| Err(RepoError::database("get_room", "disk I/O error")));
    repo.expect_save()
        .returning(|_| Err(RepoError::database("save_room", "disk I/O error")));
    let repo: Arc<dyn RoomRepo> = Arc::new(repo);

    let app = build_test_app(vec![1, 2, 2, 2], Some(repo));
    app.store
        .create(started(seeded_room("ROOM01", &[("a", 0)])))
        .await
        .unwrap();
    let (addr, server) = spawn_ws_server(app.clone()).await;
    let mut a = ws_join(addr, "ROOM01", "a").await;

    for expected in [3, 7] {
        ws_send_type(&mut a, "ROLL_DICE").await;
        match ws_expect_message(&mut a, WAIT, is_update).await {
            ServerMessage::UpdateState { state } => {
                assert_eq!(state.players.get(&PlayerId::new("a")).unwrap().position, expected);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    let room = app
        .store
        .get(&RoomId::new("ROOM01"))
        .await
        .unwrap()
        .peek()
        .await;
    assert_eq!(room.player(&PlayerId::new("a")).unwrap().position, 7);
    assert_eq!(room.state().turn_player_id, Some(PlayerId::new("a")));

    server.abort();
}
