use crate::board::{self, GO_BONUS, JAIL_POSITION};
use crate::value_objects::DiceRoll;
use crate::{PlayerId, Room};

use super::rent::{collect_rent, RentOutcome};
use super::{RejectReason, Resolution, TurnEvent};

pub(super) fn roll_dice(room: &Room, actor: &PlayerId, dice: DiceRoll) -> Resolution {
    let Some(player) = room.player(actor) else {
        return Resolution::Rejected(RejectReason::NotInRoom);
    };
    if !room.state().game_started {
        return Resolution::Rejected(RejectReason::GameNotStarted);
    }
    if !room.state().is_turn_of(actor) {
        return Resolution::Rejected(RejectReason::NotYourTurn);
    }

    let mut next = room.clone();
    let mut message = String::new();

    if player.in_jail {
        if !dice.is_doubles() {
            // Failed escape: no movement and the turn stays put.
            return Resolution::Accepted {
                room: next,
                event: TurnEvent {
                    last_roll: Some(dice),
                    message: format!("Rolled {dice}. Stuck in Jail."),
                },
            };
        }
        if let Some(player) = next.player_mut(actor) {
            player.in_jail = false;
        }
        message.push_str(&format!("Rolled doubles {dice}! Released from Jail. "));
    }

    let Some(mover) = next.player_mut(actor) else {
        return Resolution::Rejected(RejectReason::NotInRoom);
    };
    let movement = mover.advance(dice.total());
    message.push_str(&format!("Rolled {}.", dice.total()));
    if movement.passed_go {
        mover.money += GO_BONUS;
        message.push_str(&format!(" Passed GO! Collected ${GO_BONUS}."));
    }

    let tile = board::lookup(movement.to);
    message.push_str(&format!(
        " Landed on {}",
        tile.map_or("Unknown", |t| t.name)
    ));

    match tile {
        Some(tile) if tile.is_go_to_jail() => {
            mover.position = JAIL_POSITION;
            mover.in_jail = true;
            message.push_str(". Sent to Jail!");
        }
        Some(tile) if tile.is_property() => {
            let owner = next
                .state()
                .owner_of(tile.id)
                .filter(|owner| *owner != actor)
                .cloned();
            if let Some(owner) = owner {
                let owner_name = next
                    .player(&owner)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| owner.to_string());
                match collect_rent(&mut next, actor, &owner, tile.rent) {
                    Some(RentOutcome::Paid(rent)) => {
                        message.push_str(&format!(". Paid ${rent} rent to {owner_name}."));
                    }
                    Some(RentOutcome::Bankrupt(transfer)) => {
                        message.push_str(&format!(". Bankrupt! Paid ${transfer} to {owner_name}."));
                    }
                    None => {}
                }
            }
        }
        // Tax, cards, stations, utilities and passive corners only annotate.
        _ => {}
    }

    advance_turn(&mut next, actor);

    Resolution::Accepted {
        room: next,
        event: TurnEvent {
            last_roll: Some(dice),
            message,
        },
    }
}

/// Pass the turn to the next seat in join order.
fn advance_turn(room: &mut Room, current: &PlayerId) {
    let next = room.players().next_after(current).map(|p| p.id.clone());
    room.state_mut().turn_player_id = next;
}
