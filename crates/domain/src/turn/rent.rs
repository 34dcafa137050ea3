use crate::{PlayerId, Room};

/// How a rent charge was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentOutcome {
    /// The full rent changed hands.
    Paid(i64),
    /// The mover could not cover the rent; everything they had was handed
    /// over and their balance is now zero.
    Bankrupt(i64),
}

/// Charge `rent` from `mover` to `owner`.
///
/// Money is conserved: whatever leaves the mover arrives at the owner. An
/// insolvent mover hands over their whole balance and stays in the game.
pub(crate) fn collect_rent(
    room: &mut Room,
    mover: &PlayerId,
    owner: &PlayerId,
    rent: i64,
) -> Option<RentOutcome> {
    if !room.contains_player(owner) {
        return None;
    }
    let rent = rent.max(0);
    let payer = room.player_mut(mover)?;
    let outcome = if payer.money >= rent {
        payer.money -= rent;
        RentOutcome::Paid(rent)
    } else {
        let transfer = payer.money.max(0);
        payer.money = 0;
        RentOutcome::Bankrupt(transfer)
    };

    let amount = match outcome {
        RentOutcome::Paid(amount) | RentOutcome::Bankrupt(amount) => amount,
    };
    room.player_mut(owner)?.money += amount;
    Some(outcome)
}
