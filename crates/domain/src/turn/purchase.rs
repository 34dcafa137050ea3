use crate::board;
use crate::{PlayerId, Room};

use super::{RejectReason, Resolution, TurnEvent};

/// Buy the property tile the actor is standing on.
///
/// Not gated on the turn: any seated player may buy their current tile.
pub(super) fn buy_property(room: &Room, actor: &PlayerId) -> Resolution {
    let Some(player) = room.player(actor) else {
        return Resolution::Rejected(RejectReason::NotInRoom);
    };
    let Some(tile) = board::lookup(player.position).filter(|t| t.is_property()) else {
        return Resolution::Rejected(RejectReason::NotPurchasable);
    };
    if room.state().owner_of(tile.id).is_some() {
        return Resolution::Rejected(RejectReason::AlreadyOwned);
    }
    if player.money < tile.price {
        return Resolution::Rejected(RejectReason::InsufficientFunds);
    }

    let mut next = room.clone();
    if !next.state_mut().claim(tile.id, actor.clone()) {
        return Resolution::Rejected(RejectReason::AlreadyOwned);
    }
    let Some(buyer) = next.player_mut(actor) else {
        return Resolution::Rejected(RejectReason::NotInRoom);
    };
    buyer.money -= tile.price;
    buyer.properties.push(tile.id);

    let message = format!("{} bought {} for ${}", buyer.name, tile.name, tile.price);
    Resolution::Accepted {
        room: next,
        event: TurnEvent {
            last_roll: None,
            message,
        },
    }
}
