//! Player actions: dice rolls and purchases.

use richup_domain::turn::{self, Action, Resolution};
use richup_domain::value_objects::DIE_FACES;
use richup_domain::{ConnectionId, DiceRoll, PlayerId};
use richup_shared::{ClientMessage, ServerMessage};

use crate::app::App;
use crate::infrastructure::ports::RandomPort;
use crate::stores::RoomHandle;

/// Run one client action against the room.
///
/// Accepted actions are committed, persisted and broadcast to the whole room
/// without releasing the room lock. Rejections go back to the actor only.
pub(super) async fn handle_action(
    app: &App,
    handle: &RoomHandle,
    connection_id: ConnectionId,
    player_id: &PlayerId,
    msg: ClientMessage,
) {
    let action = match msg {
        ClientMessage::RollDice => Action::RollDice(draw_dice(app.random.as_ref())),
        ClientMessage::BuyProperty => Action::BuyProperty,
        ClientMessage::Unknown => return,
    };

    let mut room = handle.lock().await;
    let room_id = room.room_id().clone();

    match turn::resolve(&room, player_id, action) {
        Resolution::Accepted { room: next, event } => {
            *room = next;
            if let Err(e) = app.store.persist(&mut room).await {
                tracing::warn!(room_id = %room_id, error = %e, "Failed to persist room after action");
            }
            tracing::debug!(
                room_id = %room_id,
                player_id = %player_id,
                action = action.name(),
                log = %event.message,
                "Action accepted"
            );
            app.hub
                .broadcast(&room_id, ServerMessage::update_state(&room, &event))
                .await;
        }
        Resolution::Rejected(reason) => {
            tracing::debug!(
                room_id = %room_id,
                player_id = %player_id,
                action = action.name(),
                reason = %reason,
                "Action rejected"
            );
            app.hub
                .send_to(
                    &room_id,
                    connection_id,
                    ServerMessage::action_rejected(&action, reason),
                )
                .await;
        }
    }
}

fn draw_dice(random: &dyn RandomPort) -> DiceRoll {
    DiceRoll::roll(|| {
        let face = random.gen_range(1, i32::from(DIE_FACES));
        u8::try_from(face).unwrap_or(1)
    })
}
